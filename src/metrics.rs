//! Band tables for every metric the dashboards show.
//!
//! Thresholds are constants with compile-time ordering checks, so a table
//! whose bounds are out of order fails to build.

use crate::bands::{Band, BandTable, Color, DisplayText, Style, StyleResult, is_ascending};
use clap::ValueEnum;
use serde::Serialize;

// =============================================================================
// Palette
// =============================================================================

pub const RED: Color = Color::from_hex(0xFF0000);
pub const ORANGE: Color = Color::from_hex(0xFC6A03);
pub const GREEN: Color = Color::from_hex(0x39E75F);
pub const WHITE: Color = Color::from_hex(0xFFFFFF);
pub const BLACK: Color = Color::from_hex(0x000000);
pub const NO_DATA_GRAY: Color = Color::from_hex(0x9E9E9E);
pub const LIGHT_GRAY: Color = Color::from_hex(0xD3D3D3);
/// Background of dry or missing gauges on the tide/salinity boards.
pub const DRY_OLIVE: Color = Color::from_hex(0x8B8000);

const SALINITY_MARINE: Color = Color::from_hex(0x006505);
const SALINITY_HIGH: Color = Color::from_hex(0x9AC93D);
const SALINITY_MODERATE: Color = Color::from_hex(0xFAFA3B);
const SALINITY_LOW: Color = Color::from_hex(0xFFA30E);
const SALINITY_VERY_LOW: Color = Color::from_hex(0xFF0000);
const SALINITY_BRACKISH: Color = Color::from_hex(0x840000);

// =============================================================================
// Thresholds
// =============================================================================

/// Tide height (m) at which the gauge turns red.
pub const TIDE_DANGER: f64 = 5.5;

/// Surface temperature (C) at which the Galway Bay gauge turns red.
pub const SURFACE_TEMPERATURE_DANGER: f64 = 20.0;

/// Salinity (PSU) band floors, ascending.
pub const SALINITY_BRACKISH_MIN: f64 = 5.0;
pub const SALINITY_VERY_LOW_MIN: f64 = 10.0;
pub const SALINITY_LOW_MIN: f64 = 15.0;
pub const SALINITY_MODERATE_MIN: f64 = 20.0;
pub const SALINITY_HIGH_MIN: f64 = 25.0;
pub const SALINITY_MARINE_MIN: f64 = 30.0;

const _: () = assert!(SALINITY_BRACKISH_MIN < SALINITY_VERY_LOW_MIN);
const _: () = assert!(SALINITY_VERY_LOW_MIN < SALINITY_LOW_MIN);
const _: () = assert!(SALINITY_LOW_MIN < SALINITY_MODERATE_MIN);
const _: () = assert!(SALINITY_MODERATE_MIN < SALINITY_HIGH_MIN);
const _: () = assert!(SALINITY_HIGH_MIN < SALINITY_MARINE_MIN);

/// Sea temperature (C) bands for the Atlantic farm site.
pub const ATLANTIC_TEMPERATURE_WARNING: f64 = 17.0;
pub const ATLANTIC_TEMPERATURE_DANGER: f64 = 19.0;

const _: () = assert!(ATLANTIC_TEMPERATURE_WARNING < ATLANTIC_TEMPERATURE_DANGER);

/// Sea temperature (C) at which the Mediterranean gauge turns red.
pub const MEDITERRANEAN_TEMPERATURE_DANGER: f64 = 30.0;

/// Wave height (m) bands.
pub const WAVE_HEIGHT_WARNING: f64 = 2.0;
pub const WAVE_HEIGHT_DANGER: f64 = 3.0;

const _: () = assert!(WAVE_HEIGHT_WARNING < WAVE_HEIGHT_DANGER);

/// Dissolved oxygen saturation (%) below which the gauge turns red.
pub const OXYGEN_HEALTHY_MIN: f64 = 70.0;

/// Marine heatwave intensity at which the gauge turns red.
pub const HEATWAVE_ACTIVE: f64 = 5.0;

/// Character budget for a dry-gauge label once its unit is dropped.
pub const DRY_LABEL_CHARS: usize = 8;

/// Font size (px) used on dry or missing tide/salinity gauges.
pub const DRY_FONT_SIZE_PX: u8 = 11;

// =============================================================================
// Tables
// =============================================================================

const DANGER_WHITE: Style = Style::new(RED).with_text(WHITE);
const NORMAL_BLACK: Style = Style::new(GREEN).with_text(BLACK);
const DRY_STYLE: Style = Style::new(DRY_OLIVE)
    .with_text(WHITE)
    .with_font_size(DRY_FONT_SIZE_PX);
const NOT_AVAILABLE: StyleResult =
    StyleResult::no_data(Style::new(NO_DATA_GRAY), DisplayText::Replace("N/D"));

const TIDE_BANDS: [Band; 1] = [Band::new(TIDE_DANGER, "danger", DANGER_WHITE)];

const SURFACE_TEMPERATURE_BANDS: [Band; 1] =
    [Band::new(SURFACE_TEMPERATURE_DANGER, "danger", DANGER_WHITE)];

const SALINITY_BANDS: [Band; 6] = [
    Band::new(
        SALINITY_BRACKISH_MIN,
        "brackish",
        Style::new(SALINITY_BRACKISH).with_text(WHITE),
    ),
    Band::new(
        SALINITY_VERY_LOW_MIN,
        "very-low",
        Style::new(SALINITY_VERY_LOW).with_text(WHITE),
    ),
    Band::new(
        SALINITY_LOW_MIN,
        "low",
        Style::new(SALINITY_LOW).with_text(BLACK),
    ),
    Band::new(
        SALINITY_MODERATE_MIN,
        "moderate",
        Style::new(SALINITY_MODERATE).with_text(BLACK),
    ),
    Band::new(
        SALINITY_HIGH_MIN,
        "high",
        Style::new(SALINITY_HIGH).with_text(BLACK),
    ),
    Band::new(
        SALINITY_MARINE_MIN,
        "marine",
        Style::new(SALINITY_MARINE).with_text(WHITE),
    ),
];

const ATLANTIC_TEMPERATURE_BANDS: [Band; 2] = [
    Band::new(ATLANTIC_TEMPERATURE_WARNING, "warning", Style::new(ORANGE)),
    Band::new(ATLANTIC_TEMPERATURE_DANGER, "danger", Style::new(RED)),
];

const MEDITERRANEAN_TEMPERATURE_BANDS: [Band; 1] = [Band::new(
    MEDITERRANEAN_TEMPERATURE_DANGER,
    "danger",
    Style::new(RED),
)];

const WAVE_HEIGHT_BANDS: [Band; 2] = [
    Band::new(WAVE_HEIGHT_WARNING, "warning", Style::new(ORANGE)),
    Band::new(WAVE_HEIGHT_DANGER, "danger", Style::new(RED)),
];

const OXYGEN_BANDS: [Band; 1] = [Band::new(OXYGEN_HEALTHY_MIN, "normal", Style::new(GREEN))];

const HEATWAVE_BANDS: [Band; 1] = [Band::new(HEATWAVE_ACTIVE, "active", Style::new(RED))];

const _: () = assert!(is_ascending(&SALINITY_BANDS));
const _: () = assert!(is_ascending(&ATLANTIC_TEMPERATURE_BANDS));
const _: () = assert!(is_ascending(&WAVE_HEIGHT_BANDS));

static TIDE: BandTable = BandTable {
    bands: &TIDE_BANDS,
    default: Band::floor("normal", NORMAL_BLACK),
    no_data: StyleResult::no_data(DRY_STYLE, DisplayText::Truncate(DRY_LABEL_CHARS)),
};

static SURFACE_TEMPERATURE: BandTable = BandTable {
    bands: &SURFACE_TEMPERATURE_BANDS,
    default: Band::floor("normal", NORMAL_BLACK),
    no_data: StyleResult::no_data(DRY_STYLE, DisplayText::Truncate(DRY_LABEL_CHARS)),
};

static SALINITY: BandTable = BandTable {
    bands: &SALINITY_BANDS,
    default: Band::floor("fresh", Style::new(BLACK).with_text(WHITE)),
    no_data: StyleResult::no_data(DRY_STYLE, DisplayText::Unchanged),
};

static ATLANTIC_TEMPERATURE: BandTable = BandTable {
    bands: &ATLANTIC_TEMPERATURE_BANDS,
    default: Band::floor("normal", Style::new(GREEN)),
    no_data: NOT_AVAILABLE,
};

static MEDITERRANEAN_TEMPERATURE: BandTable = BandTable {
    bands: &MEDITERRANEAN_TEMPERATURE_BANDS,
    default: Band::floor("normal", Style::new(GREEN)),
    no_data: NOT_AVAILABLE,
};

static WAVE_HEIGHT: BandTable = BandTable {
    bands: &WAVE_HEIGHT_BANDS,
    default: Band::floor("normal", Style::new(GREEN)),
    no_data: NOT_AVAILABLE,
};

static OXYGEN: BandTable = BandTable {
    bands: &OXYGEN_BANDS,
    default: Band::floor("danger", Style::new(RED)),
    no_data: NOT_AVAILABLE,
};

// Heatwave gauges have no missing-data treatment: an absent value looks calm.
static HEATWAVE: BandTable = BandTable {
    bands: &HEATWAVE_BANDS,
    default: Band::floor("inactive", Style::new(LIGHT_GRAY)),
    no_data: StyleResult::no_data(Style::new(LIGHT_GRAY), DisplayText::Unchanged),
};

/// Style of a raised marine-event flag.
pub const MARINE_EVENT_STYLE: Style = Style::new(RED).with_text(BLACK);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    Tide,
    SurfaceTemperature,
    Salinity,
    /// Sea temperature on the Atlantic boards (17/19 C bands).
    AtlanticTemperature,
    /// Sea temperature on the Mediterranean boards (30 C band).
    MediterraneanTemperature,
    WaveHeight,
    Oxygen,
    Heatwave,
}

impl Metric {
    pub fn table(self) -> &'static BandTable {
        match self {
            Self::Tide => &TIDE,
            Self::SurfaceTemperature => &SURFACE_TEMPERATURE,
            Self::Salinity => &SALINITY,
            Self::AtlanticTemperature => &ATLANTIC_TEMPERATURE,
            Self::MediterraneanTemperature => &MEDITERRANEAN_TEMPERATURE,
            Self::WaveHeight => &WAVE_HEIGHT,
            Self::Oxygen => &OXYGEN,
            Self::Heatwave => &HEATWAVE,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Tide => "Tide",
            Self::SurfaceTemperature => "Surface temperature",
            Self::Salinity => "Salinity",
            Self::AtlanticTemperature | Self::MediterraneanTemperature => "Sea temperature",
            Self::WaveHeight => "Wave height",
            Self::Oxygen => "Dissolved oxygen",
            Self::Heatwave => "Marine heatwave",
        }
    }

    pub const fn unit(self) -> &'static str {
        match self {
            Self::Tide | Self::WaveHeight => "m",
            Self::SurfaceTemperature
            | Self::AtlanticTemperature
            | Self::MediterraneanTemperature
            | Self::Heatwave => "°C",
            Self::Salinity => "PSU",
            Self::Oxygen => "%",
        }
    }
}
