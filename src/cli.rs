use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate, generate_to};
use colored::Colorize;
use tidewatch::clock::DEFAULT_LAG_DAYS;
use tidewatch::dashboard::Site;
use tidewatch::metrics::Metric;

use crate::formatting::{describe_style, format_value, swatch};

pub const DEFAULT_OUTPUT_DIR: &str = "data/output/dashboard";
pub const DEFAULT_CSV_PATH: &str = "data/output/gauges.csv";

pub const READINGS_HELP: &str = "Readings document to render: JSON, or an HTML page whose elements carry `id` and `content` (selected by the .html/.htm extension).";
pub const SITE_HELP: &str = "Site dashboard to build. Defaults to the site named by the readings document.";
pub const OUTPUT_DIR_HELP: &str = "Directory that receives index.html and the daily/weekly slide pages (defaults to data/output/dashboard).";
pub const SAVE_CSV_HELP: &str = "Save every gauge classification to the given CSV file (defaults to data/output/gauges.csv when no path is provided). Use --archive-csv to store a .gz instead.";
pub const ARCHIVE_CSV_HELP: &str = "Archive the saved CSV output into a .gz file.";
pub const CLOCK_LAG_HELP: &str = "Days subtracted from the current time in the dashboard clock.";
pub const WATCH_HELP: &str = "Re-read the readings and re-render every second until interrupted.";
pub const TICKS_HELP: &str = "Stop after this many renders (implies --watch).";

#[derive(Debug, Parser)]
#[command(
    name = "tidewatch",
    about = "Render coastal sensor readings into a color-coded static HTML dashboard.",
    version = env!("CARGO_PKG_VERSION"),
    subcommand_negates_reqs = true
)]
pub struct Cli {
    #[arg(long, value_name = "FILE", required = true, help = READINGS_HELP)]
    pub readings: Option<PathBuf>,
    #[arg(long, value_enum, help = SITE_HELP)]
    pub site: Option<Site>,
    #[arg(long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR, help = OUTPUT_DIR_HELP)]
    pub output_dir: PathBuf,
    #[arg(
        long,
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = DEFAULT_CSV_PATH,
        help = SAVE_CSV_HELP
    )]
    pub save_csv: Option<PathBuf>,
    #[arg(long, help = ARCHIVE_CSV_HELP)]
    pub archive_csv: bool,
    #[arg(long, help = "Minify the generated HTML pages.")]
    pub minify: bool,
    #[arg(long, value_name = "DAYS", default_value_t = DEFAULT_LAG_DAYS, help = CLOCK_LAG_HELP)]
    pub clock_lag_days: u32,
    #[arg(long, help = WATCH_HELP)]
    pub watch: bool,
    #[arg(
        long,
        value_name = "N",
        value_parser = clap::value_parser!(u64).range(1..),
        help = TICKS_HELP
    )]
    pub ticks: Option<u64>,
    #[arg(long, help = "Disable progress spinner output.")]
    pub no_progress: bool,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Classify a single reading and print the style its gauge would get.
    Classify {
        #[arg(value_enum, help = "Metric whose bands are applied.")]
        metric: Metric,
        #[arg(help = "Raw reading, e.g. \"6.0\" or \"DRY\".", allow_hyphen_values = true)]
        value: String,
    },
    /// Generate shell completion scripts, optionally installing them for the current user.
    Completions {
        #[arg(value_enum, help = "Shell to generate completions for.")]
        shell: Shell,
        #[arg(
            long,
            value_name = "DIR",
            help = "Directory to write the completion script to."
        )]
        output_dir: Option<PathBuf>,
        #[arg(
            long,
            help = "Install the completion script into the default location for the selected shell."
        )]
        install: bool,
    },
}

pub fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Classify { metric, value } => {
            print_classification(metric, &value);
            Ok(())
        }
        Commands::Completions {
            shell,
            output_dir,
            install,
        } => generate_completions(shell, output_dir, install),
    }
}

fn print_classification(metric: Metric, raw: &str) {
    let result = metric.table().classify(raw);
    let label = format!("{} {}", raw.trim(), metric.unit());
    let shown = result.display.apply(&label);
    println!(
        "{} {}",
        "Metric".bright_yellow().bold(),
        metric.label().bright_white()
    );
    println!(
        "{} {}",
        "Value".bright_yellow().bold(),
        format_value(result.value).bright_white()
    );
    println!(
        "{} {}",
        "Level".bright_yellow().bold(),
        result.level.bright_white()
    );
    println!(
        "{} {}",
        "Style".bright_yellow().bold(),
        describe_style(&result.style).bright_white()
    );
    println!(
        "{} {}",
        "CSS".bright_yellow().bold(),
        result.style.to_css().bright_white()
    );
    println!(
        "{} {}",
        "Gauge".bright_yellow().bold(),
        swatch(&result.style, &format!(" {shown} "))
    );
}

fn generate_completions(shell: Shell, output_dir: Option<PathBuf>, install: bool) -> Result<()> {
    let mut command = Cli::command();
    let bin_name = command.get_name().to_string();

    let target_dir = if let Some(dir) = output_dir {
        Some(dir)
    } else if install {
        Some(default_install_dir(shell)?)
    } else {
        None
    };

    if let Some(dir) = target_dir {
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create completion directory {}", dir.display()))?;
        let path = generate_to(shell, &mut command, bin_name, &dir)
            .context("failed to write completion file")?;
        println!("Installed {shell:?} completions to {}", path.display());
    } else {
        let mut stdout = io::stdout().lock();
        generate(shell, &mut command, bin_name, &mut stdout);
        stdout
            .flush()
            .context("failed to flush completion output")?;
    }

    Ok(())
}

fn default_install_dir(shell: Shell) -> Result<PathBuf> {
    let home = std::env::var_os("HOME").ok_or_else(|| {
        anyhow!("HOME environment variable is not set; use --output-dir to specify a path")
    })?;
    let mut path = PathBuf::from(home);

    match shell {
        Shell::Bash => path.push(".local/share/bash-completion/completions"),
        Shell::Elvish => path.push(".elvish/lib/completions"),
        Shell::Fish => path.push(".config/fish/completions"),
        Shell::PowerShell => path.push(".local/share/powershell/Scripts"),
        Shell::Zsh => path.push(".local/share/zsh/site-functions"),
        other => {
            return Err(anyhow!(
                "no default install location for {other:?}; specify --output-dir"
            ));
        }
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn save_csv_flag_without_path_uses_default() {
        let cli = Cli::try_parse_from(["tidewatch", "--readings", "r.json", "--save-csv"]).unwrap();
        assert_eq!(cli.save_csv, Some(PathBuf::from(DEFAULT_CSV_PATH)));
        assert_eq!(cli.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(cli.clock_lag_days, DEFAULT_LAG_DAYS);
    }

    #[test]
    fn readings_are_required_without_subcommand() {
        assert!(Cli::try_parse_from(["tidewatch"]).is_err());
        let cli = Cli::try_parse_from(["tidewatch", "classify", "tide", "6.0"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Classify { metric: Metric::Tide, .. })
        ));
    }

    #[test]
    fn zero_ticks_are_rejected() {
        assert!(Cli::try_parse_from(["tidewatch", "--readings", "r.json", "--ticks", "0"]).is_err());
    }

    #[test]
    fn site_accepts_kebab_case_names() {
        let cli =
            Cli::try_parse_from(["tidewatch", "--readings", "r.json", "--site", "el-campello"])
                .unwrap();
        assert_eq!(cli.site, Some(Site::ElCampello));
    }
}
