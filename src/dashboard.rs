//! Site profiles and the adapter that turns readings into gauge views.
//!
//! A profile binds source keys of the readings store to the target elements
//! of one site dashboard. Building a view runs every binding through its
//! band table; nothing here touches HTML.

use crate::bands::{Style, StyleResult, parse_flag};
use crate::metrics::{MARINE_EVENT_STYLE, Metric};
use crate::readings::Readings;
use anyhow::{Result, anyhow};
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Site {
    DeenishIsland,
    ElCampello,
    GalwayBay,
}

impl Site {
    pub const fn name(self) -> &'static str {
        match self {
            Self::DeenishIsland => "Deenish Island",
            Self::ElCampello => "El Campello",
            Self::GalwayBay => "Galway Bay",
        }
    }

    pub fn profile(self) -> &'static Profile {
        match self {
            Self::DeenishIsland => &DEENISH_ISLAND,
            Self::ElCampello => &EL_CAMPELLO,
            Self::GalwayBay => &GALWAY_BAY,
        }
    }

    /// Resolves the dashboard to build: an explicit choice wins over the site
    /// named by the readings document.
    pub fn resolve(explicit: Option<Self>, readings: &Readings) -> Result<Self> {
        if let Some(site) = explicit {
            return Ok(site);
        }
        let named = readings
            .site
            .as_deref()
            .ok_or_else(|| anyhow!("readings do not name a site; pass --site"))?;
        Self::from_str(named, true).map_err(|_| {
            anyhow!("unknown site '{named}' (expected deenish-island, el-campello or galway-bay)")
        })
    }
}

#[derive(Debug)]
pub struct Binding {
    pub source: &'static str,
    pub targets: &'static [&'static str],
    pub metric: Metric,
    pub caption: &'static str,
}

#[derive(Debug)]
pub struct FlagBinding {
    pub source: &'static str,
    pub target: &'static str,
    pub caption: &'static str,
}

#[derive(Debug)]
pub struct TideStatusBinding {
    pub source: &'static str,
    pub image_target: &'static str,
    pub label_target: &'static str,
}

#[derive(Debug)]
pub struct Profile {
    pub bindings: &'static [Binding],
    pub flags: &'static [FlagBinding],
    pub heatwave: Option<Binding>,
    pub tide_status: Option<TideStatusBinding>,
}

const MARINE_EVENT: FlagBinding = FlagBinding {
    source: "marine-warning-value",
    target: "marine-warning",
    caption: "Extreme marine event",
};

static DEENISH_ISLAND: Profile = Profile {
    bindings: &[
        Binding {
            source: "latest-temperature-value",
            targets: &["latest-temperature"],
            metric: Metric::AtlanticTemperature,
            caption: "Latest temperature",
        },
        Binding {
            source: "latest-oxygen-value",
            targets: &["latest-oxygen"],
            metric: Metric::Oxygen,
            caption: "Latest dissolved oxygen",
        },
        Binding {
            source: "min-forecast-temperature-value",
            targets: &["min-forecast-temperature"],
            metric: Metric::AtlanticTemperature,
            caption: "Forecast minimum temperature",
        },
        Binding {
            source: "mean-forecast-temperature-value",
            targets: &["mean-forecast-temperature"],
            metric: Metric::AtlanticTemperature,
            caption: "Forecast mean temperature",
        },
        Binding {
            source: "max-forecast-temperature-value",
            targets: &["max-forecast-temperature"],
            metric: Metric::AtlanticTemperature,
            caption: "Forecast maximum temperature",
        },
    ],
    flags: &[MARINE_EVENT],
    heatwave: None,
    tide_status: None,
};

static EL_CAMPELLO: Profile = Profile {
    bindings: &[
        Binding {
            source: "latest-temperature-value",
            targets: &["latest-temperature"],
            metric: Metric::MediterraneanTemperature,
            caption: "Latest temperature",
        },
        Binding {
            source: "latest-oxygen-value",
            targets: &["latest-oxygen"],
            metric: Metric::Oxygen,
            caption: "Latest dissolved oxygen",
        },
        Binding {
            source: "significant-wave-height-value",
            targets: &["latest-swh", "latest-swh-mobile"],
            metric: Metric::WaveHeight,
            caption: "Significant wave height",
        },
        Binding {
            source: "forecast-max-swh-value",
            targets: &["max-swh-fc", "max-swh-fc-mobile"],
            metric: Metric::WaveHeight,
            caption: "Forecast maximum wave height",
        },
        Binding {
            source: "swell-value",
            targets: &["latest-swell"],
            metric: Metric::WaveHeight,
            caption: "Swell",
        },
        Binding {
            source: "forecast-max-swell-value",
            targets: &["max-swell-fc"],
            metric: Metric::WaveHeight,
            caption: "Forecast maximum swell",
        },
    ],
    flags: &[MARINE_EVENT],
    heatwave: Some(Binding {
        source: "mhw-value",
        targets: &["mhw"],
        metric: Metric::Heatwave,
        caption: "Marine heatwave intensity",
    }),
    tide_status: None,
};

static GALWAY_BAY: Profile = Profile {
    bindings: &[
        Binding {
            source: "tide-now",
            targets: &["current-tide"],
            metric: Metric::Tide,
            caption: "Tide now",
        },
        Binding {
            source: "tide-extreme-1",
            targets: &["next-tide-value-1"],
            metric: Metric::Tide,
            caption: "Next tide",
        },
        Binding {
            source: "tide-extreme-2",
            targets: &["next-tide-value-2"],
            metric: Metric::Tide,
            caption: "Following tide",
        },
        Binding {
            source: "surface-temperature-now",
            targets: &["current-surface-temperature"],
            metric: Metric::SurfaceTemperature,
            caption: "Surface temperature",
        },
        Binding {
            source: "minimum-surface-temperature-forecast",
            targets: &["min-surface-temperature-forecast"],
            metric: Metric::SurfaceTemperature,
            caption: "Forecast minimum temperature",
        },
        Binding {
            source: "maximum-surface-temperature-forecast",
            targets: &["max-surface-temperature-forecast"],
            metric: Metric::SurfaceTemperature,
            caption: "Forecast maximum temperature",
        },
        Binding {
            source: "surface-salinity-now",
            targets: &["current-surface-salinity"],
            metric: Metric::Salinity,
            caption: "Surface salinity",
        },
        Binding {
            source: "minimum-surface-salinity-forecast",
            targets: &["min-surface-salinity-forecast"],
            metric: Metric::Salinity,
            caption: "Forecast minimum salinity",
        },
        Binding {
            source: "maximum-surface-salinity-forecast",
            targets: &["max-surface-salinity-forecast"],
            metric: Metric::Salinity,
            caption: "Forecast maximum salinity",
        },
    ],
    flags: &[],
    heatwave: None,
    tide_status: Some(TideStatusBinding {
        source: "tidal-status",
        image_target: "galway-tidal-status",
        label_target: "galway-tidal-status-label",
    }),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TideDirection {
    Rising,
    Falling,
}

impl TideDirection {
    pub fn from_status(raw: &str) -> Option<Self> {
        match raw.trim() {
            "flood" => Some(Self::Rising),
            "ebb" => Some(Self::Falling),
            _ => None,
        }
    }

    pub const fn image(self) -> &'static str {
        match self {
            Self::Rising => "static/rising.png",
            Self::Falling => "static/falling.png",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Rising => "RISING TIDE",
            Self::Falling => "FALLING TIDE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GaugeView {
    pub target: &'static str,
    pub source: &'static str,
    pub caption: &'static str,
    pub metric: Metric,
    pub raw: Option<String>,
    pub text: String,
    pub result: StyleResult,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagView {
    pub target: &'static str,
    pub caption: &'static str,
    pub raised: bool,
    pub style: Option<Style>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TideStatusView {
    pub image_target: &'static str,
    pub label_target: &'static str,
    pub direction: Option<TideDirection>,
    pub image: Option<String>,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub site: Site,
    pub clock: String,
    pub gauges: Vec<GaugeView>,
    pub flags: Vec<FlagView>,
    pub tide_status: Option<TideStatusView>,
}

impl DashboardView {
    pub fn count_level(&self, level: &str) -> usize {
        self.gauges
            .iter()
            .filter(|gauge| gauge.result.level == level)
            .count()
    }

    pub fn no_data_count(&self) -> usize {
        self.gauges
            .iter()
            .filter(|gauge| gauge.result.is_no_data())
            .count()
    }
}

pub fn build_view(site: Site, readings: &Readings, clock: String) -> DashboardView {
    let profile = site.profile();
    let mut gauges = Vec::new();
    for binding in profile.bindings.iter().chain(profile.heatwave.as_ref()) {
        gauges.extend(gauge_views(binding, readings));
    }
    let flags = profile
        .flags
        .iter()
        .map(|binding| flag_view(binding, readings))
        .collect();
    let tide_status = profile
        .tide_status
        .as_ref()
        .map(|binding| tide_status_view(binding, readings));

    DashboardView {
        site,
        clock,
        gauges,
        flags,
        tide_status,
    }
}

fn gauge_views<'a>(
    binding: &'static Binding,
    readings: &'a Readings,
) -> impl Iterator<Item = GaugeView> + 'a {
    let raw = readings.value(binding.source);
    let result = binding.metric.table().classify(raw.unwrap_or_default());
    binding.targets.iter().map(move |&target| {
        let current = readings
            .label(target)
            .map_or_else(|| default_label(raw, binding.metric), str::to_string);
        GaugeView {
            target,
            source: binding.source,
            caption: binding.caption,
            metric: binding.metric,
            raw: raw.map(str::to_string),
            text: result.display.apply(&current),
            result,
        }
    })
}

fn default_label(raw: Option<&str>, metric: Metric) -> String {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => format!("{value} {}", metric.unit()),
        _ => "--".to_string(),
    }
}

fn flag_view(binding: &FlagBinding, readings: &Readings) -> FlagView {
    let raised = readings.value(binding.source).is_some_and(parse_flag);
    let text = readings.label(binding.target).map_or_else(
        || {
            if raised {
                "Event in progress".to_string()
            } else {
                "No event".to_string()
            }
        },
        str::to_string,
    );
    FlagView {
        target: binding.target,
        caption: binding.caption,
        raised,
        style: raised.then_some(MARINE_EVENT_STYLE),
        text,
    }
}

fn tide_status_view(binding: &TideStatusBinding, readings: &Readings) -> TideStatusView {
    let direction = readings
        .value(binding.source)
        .and_then(TideDirection::from_status);
    let image = direction
        .map(|direction| direction.image().to_string())
        .or_else(|| readings.label(binding.image_target).map(str::to_string));
    let label = direction.map_or_else(
        || {
            readings
                .label(binding.label_target)
                .unwrap_or("TIDE")
                .to_string()
        },
        |direction| direction.label().to_string(),
    );
    TideStatusView {
        image_target: binding.image_target,
        label_target: binding.label_target,
        direction,
        image,
        label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{BLACK, DRY_OLIVE, RED};

    fn readings(pairs: &[(&str, &str)]) -> Readings {
        let mut readings = Readings::default();
        for (key, value) in pairs {
            readings.insert(*key, *value);
        }
        readings
    }

    fn gauge<'a>(view: &'a DashboardView, target: &str) -> &'a GaugeView {
        view.gauges
            .iter()
            .find(|gauge| gauge.target == target)
            .unwrap()
    }

    #[test]
    fn galway_tide_gauges_are_colored() {
        let mut readings = readings(&[("tide-now", "6.0"), ("tide-extreme-1", "DRY")]);
        readings.insert_label("next-tide-value-1", "DRY m (OD Malin)");
        let view = build_view(Site::GalwayBay, &readings, String::new());

        let now = gauge(&view, "current-tide");
        assert_eq!(now.result.level, "danger");
        assert_eq!(now.text, "6.0 m");

        let dry = gauge(&view, "next-tide-value-1");
        assert_eq!(dry.result.style.background, DRY_OLIVE);
        assert_eq!(dry.text, "DRY m (O");

        let missing = gauge(&view, "next-tide-value-2");
        assert!(missing.result.is_no_data());
        assert_eq!(missing.raw, None);
        assert_eq!(missing.text, "--");
        assert_eq!(view.gauges.len(), 9);
    }

    #[test]
    fn one_source_can_feed_several_targets() {
        let readings = readings(&[("significant-wave-height-value", "2.5")]);
        let view = build_view(Site::ElCampello, &readings, String::new());
        let desktop = gauge(&view, "latest-swh");
        let mobile = gauge(&view, "latest-swh-mobile");
        assert_eq!(desktop.result, mobile.result);
        assert_eq!(desktop.result.level, "warning");
        assert!(view.gauges.iter().any(|gauge| gauge.target == "mhw"));
    }

    #[test]
    fn no_data_gauges_show_placeholder() {
        let readings = readings(&[("latest-temperature-value", "abc")]);
        let view = build_view(Site::DeenishIsland, &readings, String::new());
        let temperature = gauge(&view, "latest-temperature");
        assert_eq!(temperature.text, "N/D");
        assert_eq!(view.no_data_count(), 5);
        assert_eq!(view.count_level("danger"), 0);
    }

    #[test]
    fn marine_flag_turns_red() {
        let view = build_view(
            Site::DeenishIsland,
            &readings(&[("marine-warning-value", "1")]),
            String::new(),
        );
        let flag = &view.flags[0];
        assert!(flag.raised);
        let style = flag.style.unwrap();
        assert_eq!(style.background, RED);
        assert_eq!(style.text, Some(BLACK));

        let calm = build_view(
            Site::DeenishIsland,
            &readings(&[("marine-warning-value", "0")]),
            String::new(),
        );
        assert!(calm.flags[0].style.is_none());
        assert_eq!(calm.flags[0].text, "No event");
    }

    #[test]
    fn tidal_status_selects_image_and_label() {
        let rising = build_view(
            Site::GalwayBay,
            &readings(&[("tidal-status", "flood")]),
            String::new(),
        );
        let status = rising.tide_status.unwrap();
        assert_eq!(status.image.as_deref(), Some("static/rising.png"));
        assert_eq!(status.label, "RISING TIDE");

        let falling = build_view(
            Site::GalwayBay,
            &readings(&[("tidal-status", "ebb")]),
            String::new(),
        );
        assert_eq!(falling.tide_status.unwrap().label, "FALLING TIDE");

        let slack = build_view(
            Site::GalwayBay,
            &readings(&[("tidal-status", "slack")]),
            String::new(),
        );
        let status = slack.tide_status.unwrap();
        assert_eq!(status.direction, None);
        assert_eq!(status.image, None);
        assert_eq!(status.label, "TIDE");
    }

    #[test]
    fn site_resolution_prefers_explicit_choice() {
        let mut named = Readings::default();
        named.site = Some("Galway-Bay".to_string());
        assert_eq!(Site::resolve(None, &named).unwrap(), Site::GalwayBay);
        assert_eq!(
            Site::resolve(Some(Site::ElCampello), &named).unwrap(),
            Site::ElCampello
        );
        assert!(Site::resolve(None, &Readings::default()).is_err());

        named.site = Some("atlantis".to_string());
        let err = Site::resolve(None, &named).unwrap_err();
        assert!(err.to_string().contains("unknown site 'atlantis'"));
    }
}
