use crate::cli::{Cli, handle_command};
use crate::progress::{ProgressState, Stage, run_stage};
use crate::summary::{SummaryContext, SummaryPaths, print_summary};
use anyhow::{Result, anyhow};
use chrono::{DateTime, Local, Utc};
use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tidewatch::clock::Clock;
use tidewatch::dashboard::{DashboardView, Site, build_view};
use tidewatch::export::save_gauges_csv;
use tidewatch::readings::{Readings, load_readings};
use tidewatch::report::{DashboardContext, save_dashboard};

mod cli;
mod formatting;
mod progress;
mod summary;

struct Rendered {
    view: DashboardView,
    readings: Readings,
    run_started_at: DateTime<Local>,
    pages: Vec<PathBuf>,
    csv: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    colored::control::set_override(true);

    let mut cli = Cli::parse();

    if let Some(command) = cli.command.take() {
        handle_command(command)?;
        return Ok(());
    }

    let readings_path = cli
        .readings
        .take()
        .ok_or_else(|| anyhow!("--readings is required"))?;
    let progress = if cli.no_progress {
        None
    } else {
        Some(ProgressState::new(true)?)
    };

    let renders = cli.ticks.or(if cli.watch { None } else { Some(1) });
    let mut clock = Clock::new(cli.clock_lag_days, renders);
    let mut tick: u64 = 0;

    loop {
        tick += 1;
        let spinners = progress.as_ref().filter(|_| tick == 1);
        let rendered = match render_once(&cli, &readings_path, &clock, spinners).await {
            Ok(rendered) => rendered,
            Err(err) if tick > 1 => {
                warn_on_failed_tick(tick, &err);
                if clock.reschedule().await {
                    continue;
                }
                break;
            }
            Err(err) => return Err(err),
        };
        if tick == 1 {
            if let Some(progress) = &progress {
                progress.clear();
            }
            warn_on_empty_profile(&rendered.view);
            print_summary(&SummaryContext {
                view: &rendered.view,
                readings: &rendered.readings,
                run_started_at: &rendered.run_started_at,
                paths: SummaryPaths {
                    dashboard: rendered.pages.first().map(PathBuf::as_path),
                    slide_pages: rendered.pages.len().saturating_sub(1),
                    csv: rendered.csv.as_deref(),
                },
            });
        } else {
            print_tick(tick, &rendered);
        }

        if !clock.reschedule().await {
            break;
        }
    }

    Ok(())
}

async fn render_once(
    cli: &Cli,
    readings_path: &Path,
    clock: &Clock,
    progress: Option<&ProgressState>,
) -> Result<Rendered> {
    let run_started_at = Local::now();
    let source_label = readings_path.display().to_string();
    let readings = run_stage(
        progress,
        Stage::Load,
        &source_label,
        load_readings(readings_path),
    )
    .await?;

    let site = Site::resolve(cli.site, &readings)?;
    let view = build_view(site, &readings, clock.label(site.name(), Utc::now()));

    let csv = match cli.save_csv.as_deref() {
        Some(path) => Some(save_gauges_csv(&view, path, cli.archive_csv).await?),
        None => None,
    };

    let context = DashboardContext::new(&view, &readings, &run_started_at, &cli.output_dir)
        .with_csv(csv.as_deref())
        .minified(cli.minify);
    let pages = run_stage(progress, Stage::Render, site.name(), save_dashboard(&context)).await?;

    Ok(Rendered {
        view,
        readings,
        run_started_at,
        pages,
        csv,
    })
}

fn warn_on_empty_profile(view: &DashboardView) {
    if !view.gauges.is_empty() && view.no_data_count() == view.gauges.len() {
        eprintln!(
            "{} no reading matched the {} profile; every gauge shows no data",
            "warning:".yellow().bold(),
            view.site.name()
        );
    }
}

// Later ticks keep the last good output on disk.
fn warn_on_failed_tick(tick: u64, err: &anyhow::Error) {
    eprintln!(
        "{} tick {tick} skipped, keeping the previous dashboard: {err:#}",
        "warning:".yellow().bold()
    );
}

fn print_tick(tick: u64, rendered: &Rendered) {
    let index = rendered
        .pages
        .first()
        .map_or_else(String::new, |path| path.display().to_string());
    println!(
        "{} {} {}",
        format!("[tick {tick}]").bright_yellow().bold(),
        rendered.view.clock.bright_white(),
        index.bright_black()
    );
}
