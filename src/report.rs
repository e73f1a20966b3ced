use crate::carousel::{Carousel, CarouselKind, Direction, Slide};
use crate::dashboard::{DashboardView, FlagView, GaugeView, TideStatusView};
use crate::readings::Readings;
use crate::write_output_file;
use anyhow::Result;
use chrono::{DateTime, Local};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use minify_html::{Cfg, minify};
use std::path::{Path, PathBuf};

pub const INDEX_FILE: &str = "index.html";

pub struct DashboardContext<'a> {
    pub(crate) view: &'a DashboardView,
    pub(crate) readings: &'a Readings,
    pub(crate) generated_at: &'a DateTime<Local>,
    pub(crate) output_dir: &'a Path,
    pub(crate) csv_path: Option<&'a Path>,
    pub(crate) minify: bool,
}

impl<'a> DashboardContext<'a> {
    pub const fn new(
        view: &'a DashboardView,
        readings: &'a Readings,
        generated_at: &'a DateTime<Local>,
        output_dir: &'a Path,
    ) -> Self {
        Self {
            view,
            readings,
            generated_at,
            output_dir,
            csv_path: None,
            minify: false,
        }
    }

    #[must_use]
    pub const fn with_csv(mut self, path: Option<&'a Path>) -> Self {
        self.csv_path = path;
        self
    }

    #[must_use]
    pub const fn minified(mut self, minify: bool) -> Self {
        self.minify = minify;
        self
    }

    fn index_path(&self) -> PathBuf {
        self.output_dir.join(INDEX_FILE)
    }
}

/// Writes the dashboard page and one page per carousel slide. Returns the
/// paths written, dashboard first.
pub async fn save_dashboard(context: &DashboardContext<'_>) -> Result<Vec<PathBuf>> {
    let mut pages = vec![(context.index_path(), render_dashboard(context))];
    pages.extend(slide_pages(context, CarouselKind::Daily, &context.readings.daily));
    pages.extend(slide_pages(context, CarouselKind::Weekly, &context.readings.weekly));

    let mut written = Vec::with_capacity(pages.len());
    for (path, html) in pages {
        let bytes = if context.minify {
            minify(html.as_bytes(), &Cfg::new())
        } else {
            html.into_bytes()
        };
        write_output_file(&path, &bytes).await?;
        written.push(path);
    }
    Ok(written)
}

pub fn render_dashboard(context: &DashboardContext<'_>) -> String {
    let view = context.view;
    let generated_at = context
        .generated_at
        .format("%Y-%m-%d %H:%M:%S %Z")
        .to_string();
    let title = format!("{} - live conditions", view.site.name());

    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                style { (PreEscaped(DASHBOARD_STYLE)) }
            }
            body {
                div.page {
                    header.hero {
                        div.hero-top {
                            div.pill { "tidewatch v" (env!("CARGO_PKG_VERSION")) }
                            input #time .clock type="text" readonly value=(view.clock);
                        }
                        h1 { (view.site.name()) }
                        div.meta {
                            div {
                                span.label { "Generated" }
                                span.value.mono { (generated_at) }
                            }
                            div {
                                span.label { "Gauges" }
                                span.value.mono { (gauge_summary(view)) }
                            }
                        }
                    }
                    @if let Some(status) = &view.tide_status {
                        (render_tide_status(status))
                    }
                    section.gauges {
                        @for gauge in &view.gauges {
                            (render_gauge(gauge))
                        }
                        @for flag in &view.flags {
                            (render_flag(flag))
                        }
                    }
                    @if let Some(carousel) = Carousel::latest(&context.readings.daily) {
                        (render_carousel_panel(CarouselKind::Daily, &carousel, ""))
                    }
                    @if let Some(carousel) = Carousel::latest(&context.readings.weekly) {
                        (render_carousel_panel(CarouselKind::Weekly, &carousel, ""))
                    }
                    (render_downloads(context))
                    footer.footer {
                        "Colors follow the published alert bands for each metric."
                    }
                }
            }
        }
    };
    markup.into_string()
}

fn gauge_summary(view: &DashboardView) -> String {
    let total = view.gauges.len();
    let alerts = view.count_level("danger");
    let missing = view.no_data_count();
    format!("{total} shown, {alerts} in danger, {missing} without data")
}

fn render_gauge(gauge: &GaugeView) -> Markup {
    html! {
        div.card {
            label.card-label for=(gauge.target) { (gauge.caption) }
            input.gauge
                id=(gauge.target)
                type="text"
                readonly
                value=(gauge.text)
                data-level=(gauge.result.level)
                style=(gauge.result.style.to_css());
            div.card-note { (gauge.metric.label()) " · " (gauge.result.level) }
        }
    }
}

fn render_flag(flag: &FlagView) -> Markup {
    html! {
        div.card {
            label.card-label for=(flag.target) { (flag.caption) }
            input.gauge
                id=(flag.target)
                type="text"
                readonly
                value=(flag.text)
                data-raised=(if flag.raised { "true" } else { "false" })
                style=[flag.style.map(|style| style.to_css())];
        }
    }
}

fn render_tide_status(status: &TideStatusView) -> Markup {
    html! {
        section.tide-status {
            img id=(status.image_target) src=[status.image.as_deref()] alt="Tidal status";
            span id=(status.label_target) style="font-weight: bold;" { (status.label) }
        }
    }
}

fn title_id(kind: CarouselKind) -> &'static str {
    match kind {
        CarouselKind::Daily => "DailyTitle",
        CarouselKind::Weekly => "WeeklyTitle",
    }
}

fn image_id(kind: CarouselKind) -> &'static str {
    match kind {
        CarouselKind::Daily => "DailyImg",
        CarouselKind::Weekly => "WeeklyImg",
    }
}

/// Link from a page `base` deep to the page of slide `index`.
fn slide_href(kind: CarouselKind, index: usize, base: &str) -> String {
    if base.is_empty() {
        format!("{}/{index}.html", kind.slug())
    } else {
        format!("{index}.html")
    }
}

fn asset_href(image: &str, base: &str) -> String {
    let is_absolute = image.starts_with('/') || image.contains("://") || image.starts_with("data:");
    if is_absolute {
        image.to_string()
    } else {
        format!("{base}{image}")
    }
}

fn render_carousel_panel<S: Slide>(
    kind: CarouselKind,
    carousel: &Carousel<'_, S>,
    base: &str,
) -> Markup {
    let state = carousel.state();
    let slide = carousel.current();
    html! {
        section.carousel {
            h2 { (kind.title()) }
            div.carousel-title id=(title_id(kind)) { (slide.caption()) }
            img.composite id=(image_id(kind)) src=(asset_href(slide.image(), base)) alt=(slide.caption());
            nav.carousel-nav {
                @for (direction, target) in Carousel::<S>::targets(state) {
                    @if target == state.index() {
                        span.nav-disabled { (direction.label()) }
                    } @else {
                        a href=(slide_href(kind, target, base)) { (direction.label()) }
                    }
                }
                span.position.mono { (state.index() + 1) " / " (state.len()) }
            }
        }
    }
}

fn slide_pages<S: Slide>(
    context: &DashboardContext<'_>,
    kind: CarouselKind,
    slides: &[S],
) -> Vec<(PathBuf, String)> {
    let Some(mut carousel) = Carousel::first(slides) else {
        return Vec::new();
    };
    let dir = context.output_dir.join(kind.slug());
    let mut pages = Vec::with_capacity(slides.len());
    loop {
        let index = carousel.state().index();
        pages.push((
            dir.join(format!("{index}.html")),
            render_slide_page(context.view, kind, &carousel),
        ));
        if carousel.state().is_last() {
            break;
        }
        carousel.step(Direction::Next);
    }
    pages
}

fn render_slide_page<S: Slide>(
    view: &DashboardView,
    kind: CarouselKind,
    carousel: &Carousel<'_, S>,
) -> String {
    let title = format!("{} - {}", view.site.name(), kind.title());
    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                style { (PreEscaped(DASHBOARD_STYLE)) }
            }
            body {
                div.page {
                    a.back href=(format!("../{INDEX_FILE}")) { "Back to dashboard" }
                    (render_carousel_panel(kind, carousel, "../"))
                }
            }
        }
    };
    markup.into_string()
}

fn render_downloads(context: &DashboardContext<'_>) -> Markup {
    html! {
        section.downloads {
            h3 { "Downloads" }
            @match context.csv_path {
                Some(path) => {
                    @let full_display = path.to_string_lossy();
                    @let display_name = path
                        .file_name()
                        .and_then(|name| name.to_str())
                        .unwrap_or(full_display.as_ref());
                    @if let Some(rel) = relative_link(&context.index_path(), path) {
                        a.download-link href=(rel) title=(full_display.as_ref()) { (display_name) }
                    } @else {
                        span.download-path title=(full_display.as_ref()) { (display_name) }
                    }
                }
                None => {
                    p.muted { "No classification CSV was saved. Use --save-csv." }
                }
            }
        }
    }
}

fn relative_link(html_path: &Path, target: &Path) -> Option<String> {
    let html_dir = html_path.parent()?;
    let target_dir = target.parent()?;
    if html_dir == target_dir {
        target
            .file_name()
            .and_then(|name| name.to_str())
            .map(std::string::ToString::to_string)
    } else {
        None
    }
}

const DASHBOARD_STYLE: &str = r"
:root {
  color-scheme: light;
  --sea-top: #eef5f7;
  --sea-bottom: #dbe9ee;
  --ink: #13232b;
  --muted: #5a6d75;
  --card: #ffffff;
  --accent: #1d6a8a;
  --border: #c9dbe2;
  --shadow: 0 18px 48px rgba(19, 35, 43, 0.12);
}

* {
  box-sizing: border-box;
}

body {
  margin: 0;
  font-family: system-ui, 'Segoe UI', sans-serif;
  color: var(--ink);
  background: linear-gradient(160deg, var(--sea-top), var(--sea-bottom));
}

.page {
  max-width: 1100px;
  margin: 0 auto;
  padding: 40px 20px 56px;
}

.hero {
  background: var(--card);
  border: 1px solid var(--border);
  border-radius: 20px;
  padding: 28px 32px;
  box-shadow: var(--shadow);
}

.hero-top {
  display: flex;
  justify-content: space-between;
  align-items: center;
  gap: 12px;
  flex-wrap: wrap;
}

.pill {
  padding: 6px 14px;
  border-radius: 999px;
  background: rgba(29, 106, 138, 0.12);
  color: var(--accent);
  font-size: 13px;
  font-weight: 600;
  text-transform: uppercase;
  letter-spacing: 0.08em;
}

.clock {
  border: none;
  background: transparent;
  color: var(--muted);
  font-size: 14px;
  min-width: 340px;
  text-align: right;
}

h1 {
  font-size: clamp(2rem, 4vw, 2.8rem);
  margin: 14px 0 10px;
}

.meta {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
  gap: 12px;
}

.label,
.card-label {
  display: block;
  font-size: 12px;
  text-transform: uppercase;
  letter-spacing: 0.1em;
  color: var(--muted);
  margin-bottom: 6px;
}

.value {
  font-weight: 600;
}

.mono {
  font-family: ui-monospace, 'SFMono-Regular', monospace;
}

.tide-status {
  display: flex;
  align-items: center;
  gap: 14px;
  margin: 24px 0 0;
}

.tide-status img {
  width: 48px;
  height: 48px;
}

.gauges {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
  gap: 16px;
  margin: 24px 0;
}

.card {
  background: var(--card);
  border: 1px solid var(--border);
  border-radius: 16px;
  padding: 16px 18px;
  box-shadow: 0 12px 32px rgba(19, 35, 43, 0.08);
}

.gauge {
  width: 100%;
  border: none;
  border-radius: 10px;
  padding: 10px 12px;
  font-size: 20px;
  font-weight: 600;
  text-align: center;
}

.card-note {
  margin-top: 8px;
  font-size: 12px;
  color: var(--muted);
}

.carousel {
  background: var(--card);
  border: 1px solid var(--border);
  border-radius: 18px;
  padding: 20px 24px;
  margin: 24px 0;
  box-shadow: var(--shadow);
}

.carousel h2 {
  margin: 0 0 8px;
  font-size: 1.4rem;
}

.carousel-title {
  color: var(--muted);
  margin-bottom: 12px;
}

.composite {
  display: block;
  max-width: 100%;
  border-radius: 12px;
}

.carousel-nav {
  display: flex;
  gap: 10px;
  align-items: center;
  margin-top: 12px;
}

.carousel-nav a,
.nav-disabled {
  padding: 6px 12px;
  border-radius: 999px;
  border: 1px solid var(--border);
  text-decoration: none;
  font-size: 13px;
  font-weight: 600;
}

.carousel-nav a {
  color: var(--accent);
}

.nav-disabled {
  color: var(--muted);
  opacity: 0.5;
}

.position {
  margin-left: auto;
  color: var(--muted);
}

.back {
  color: var(--accent);
  font-weight: 600;
}

.downloads {
  background: var(--card);
  border: 1px solid var(--border);
  border-radius: 16px;
  padding: 18px 22px;
}

.downloads h3 {
  margin: 0 0 10px;
}

.download-link,
.download-path {
  color: var(--accent);
  font-weight: 600;
  word-break: break-all;
}

.muted {
  color: var(--muted);
}

.footer {
  margin-top: 24px;
  color: var(--muted);
  font-size: 13px;
  text-align: center;
}

@media (max-width: 720px) {
  .clock {
    min-width: 0;
    text-align: left;
  }
}
";
