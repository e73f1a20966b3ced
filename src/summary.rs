use crate::formatting::{describe_style, format_value, swatch};
use chrono::{DateTime, Local};
use colored::Colorize;
use std::path::Path;
use tidewatch::dashboard::DashboardView;
use tidewatch::readings::Readings;

pub struct SummaryPaths<'a> {
    pub(crate) dashboard: Option<&'a Path>,
    pub(crate) slide_pages: usize,
    pub(crate) csv: Option<&'a Path>,
}

pub struct SummaryContext<'a> {
    pub(crate) view: &'a DashboardView,
    pub(crate) readings: &'a Readings,
    pub(crate) run_started_at: &'a DateTime<Local>,
    pub(crate) paths: SummaryPaths<'a>,
}

pub fn print_summary(context: &SummaryContext<'_>) {
    println!();
    print_summary_header(context);
    print_summary_paths(&context.paths);
    println!();
    println!("{}", "Gauges".bold().bright_magenta());
    let table_width = print_gauge_table(context.view);
    if table_width > 0 {
        let divider = "=".repeat(table_width);
        println!("{}", divider.bright_cyan());
    }
}

fn print_summary_header(context: &SummaryContext<'_>) {
    let view = context.view;
    println!(
        "{}",
        "===================== tidewatch render ====================="
            .bold()
            .bright_cyan()
    );
    println!(
        "{} {}",
        "Run started".bright_yellow().bold(),
        context
            .run_started_at
            .format("%Y-%m-%d %H:%M:%S %Z")
            .to_string()
            .bright_white()
    );
    println!(
        "{} {}",
        "Site".bright_yellow().bold(),
        view.site.name().bright_white()
    );
    println!(
        "{} {}",
        "Clock".bright_yellow().bold(),
        view.clock.bright_white()
    );
    println!(
        "{} {} | {} | {}",
        "Readings".bright_yellow().bold(),
        format!("values: {}", context.readings.len()).bright_white(),
        format!("daily slides: {}", context.readings.daily.len()).bright_white(),
        format!("weekly slides: {}", context.readings.weekly.len()).bright_white()
    );
    let raised = view.flags.iter().filter(|flag| flag.raised).count();
    println!(
        "{} {} | {} | {}",
        "Alerts".bright_yellow().bold(),
        format!("danger: {}", view.count_level("danger")).bright_white(),
        format!("no data: {}", view.no_data_count()).bright_white(),
        format!("events: {raised}").bright_white()
    );
}

fn print_summary_paths(paths: &SummaryPaths<'_>) {
    print_path_line("Dashboard", paths.dashboard, "not written");
    println!(
        "{} {}",
        "Slide pages".bright_yellow().bold(),
        paths.slide_pages.to_string().bright_white()
    );
    print_path_line(
        "Classification CSV",
        paths.csv,
        "not saved (use --save-csv)",
    );
}

fn print_path_line(label: &str, path: Option<&Path>, hint: &str) {
    let label_colored = label.bright_yellow().bold();
    match path {
        Some(path) => println!(
            "{} {}",
            label_colored,
            format!("{}", path.display()).bright_white()
        ),
        None => println!("{} {}", label_colored, hint.bright_black()),
    }
}

fn print_gauge_table(view: &DashboardView) -> usize {
    if view.gauges.is_empty() {
        let message = "No gauges on this dashboard.";
        println!("{}", message.bright_black());
        return message.len();
    }

    let header = format!(
        "{:<34} | {:<10} | {:>8} | {:<9} | {:<28} | Text",
        "Target", "Raw", "Value", "Level", "Style"
    );
    let separator = "-----------------------------------+------------+----------+-----------+------------------------------+------";
    let mut max_width = header.len().max(separator.len());
    println!("{}", header.bold().bright_white());
    println!("{}", separator.bright_black());

    for gauge in &view.gauges {
        let raw = gauge.raw.as_deref().unwrap_or("-");
        let style = &gauge.result.style;
        let line = format!(
            "{:<34} | {:<10} | {:>8} | {:<9} | {:<28} | ",
            gauge.target,
            raw,
            format_value(gauge.result.value),
            gauge.result.level,
            describe_style(style)
        );
        max_width = max_width.max(line.len() + gauge.text.chars().count());
        let level = if gauge.result.is_no_data() {
            line.bright_black()
        } else {
            line.bright_green()
        };
        println!("{level}{}", swatch(style, &gauge.text));
    }

    for flag in &view.flags {
        let state = if flag.raised { "raised" } else { "clear" };
        let line = format!("{:<34} | {state:<10} | {}", flag.target, flag.text);
        max_width = max_width.max(line.len());
        match &flag.style {
            Some(style) => println!("{}", swatch(style, &line)),
            None => println!("{}", line.bright_black()),
        }
    }

    max_width
}
