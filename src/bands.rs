//! Threshold bands: map a raw reading onto the inline style its gauge shows.
//!
//! A [`BandTable`] holds the bands of one metric in ascending order of lower
//! bound, a default band for values below every bound, and the style used when
//! the reading is not a number. [`classify`] is pure; rendering happens
//! elsewhere.

use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: (hex >> 16) as u8,
            g: (hex >> 8) as u8,
            b: hex as u8,
        }
    }

    pub const fn rgb(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Inline style applied to a target element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub background: Color,
    pub text: Option<Color>,
    pub font_size_px: Option<u8>,
}

impl Style {
    pub const fn new(background: Color) -> Self {
        Self {
            background,
            text: None,
            font_size_px: None,
        }
    }

    pub const fn with_text(mut self, text: Color) -> Self {
        self.text = Some(text);
        self
    }

    pub const fn with_font_size(mut self, px: u8) -> Self {
        self.font_size_px = Some(px);
        self
    }

    pub fn to_css(&self) -> String {
        let mut css = format!("background-color: {};", self.background);
        if let Some(text) = self.text {
            css.push_str(&format!(" color: {text};"));
        }
        if let Some(px) = self.font_size_px {
            css.push_str(&format!(" font-size: {px}px;"));
        }
        css
    }
}

/// What happens to the label already shown by the target element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayText {
    Unchanged,
    Replace(&'static str),
    /// Keep the first N characters (drops the unit from labels like `DRY m`).
    Truncate(usize),
}

impl DisplayText {
    pub fn apply(self, current: &str) -> String {
        match self {
            Self::Unchanged => current.to_string(),
            Self::Replace(text) => text.to_string(),
            Self::Truncate(limit) => current.chars().take(limit).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub lower_bound: f64,
    pub level: &'static str,
    pub style: Style,
}

impl Band {
    pub const fn new(lower_bound: f64, level: &'static str, style: Style) -> Self {
        Self {
            lower_bound,
            level,
            style,
        }
    }

    /// Band that catches every value below the lowest bound of a table.
    pub const fn floor(level: &'static str, style: Style) -> Self {
        Self::new(f64::NEG_INFINITY, level, style)
    }

    const fn result(&self, value: f64) -> StyleResult {
        StyleResult {
            level: self.level,
            style: self.style,
            display: DisplayText::Unchanged,
            value: Some(value),
        }
    }
}

/// Outcome of one classification, consumed once by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleResult {
    pub level: &'static str,
    pub style: Style,
    pub display: DisplayText,
    /// Parsed value after rounding, `None` for no-data.
    pub value: Option<f64>,
}

impl StyleResult {
    pub const fn no_data(style: Style, display: DisplayText) -> Self {
        Self {
            level: NO_DATA_LEVEL,
            style,
            display,
            value: None,
        }
    }

    pub const fn is_no_data(&self) -> bool {
        self.value.is_none()
    }
}

pub const NO_DATA_LEVEL: &str = "no-data";

#[derive(Debug)]
pub struct BandTable {
    pub bands: &'static [Band],
    pub default: Band,
    pub no_data: StyleResult,
}

impl BandTable {
    pub fn classify(&self, raw_value: &str) -> StyleResult {
        classify(raw_value, self.bands, &self.default, &self.no_data)
    }
}

/// Picks the band with the greatest lower bound that the reading meets.
///
/// `bands` must be in ascending order of lower bound. Readings that do not
/// parse to a finite number yield `no_data`.
pub fn classify(
    raw_value: &str,
    bands: &[Band],
    default: &Band,
    no_data: &StyleResult,
) -> StyleResult {
    let Some(value) = parse_reading(raw_value) else {
        return *no_data;
    };
    bands
        .iter()
        .rev()
        .find(|band| band.lower_bound <= value)
        .unwrap_or(default)
        .result(value)
}

/// True when every lower bound is strictly greater than the previous one.
pub const fn is_ascending(bands: &[Band]) -> bool {
    let mut idx = 1;
    while idx < bands.len() {
        if bands[idx - 1].lower_bound >= bands[idx].lower_bound {
            return false;
        }
        idx += 1;
    }
    true
}

/// Parses the numeric prefix of a reading and rounds it to hundredths.
///
/// Leading whitespace is skipped and trailing text such as a unit is ignored,
/// so `"6.0 m"` reads as 6.0 while `"DRY"` has no value.
pub fn parse_reading(raw: &str) -> Option<f64> {
    let prefix = float_prefix(raw.trim_start());
    let value = prefix.parse::<f64>().ok()?;
    value.is_finite().then(|| round_hundredths(value))
}

// Rounds the exact decimal expansion of the double, so `14.995` (stored as
// 14.99499...) becomes 14.99 rather than 15.0.
fn round_hundredths(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

fn float_prefix(input: &str) -> &str {
    let bytes = input.as_bytes();
    let mut end = skip_sign(bytes, 0);
    let int_end = skip_digits(bytes, end);
    let mut digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = skip_digits(bytes, end + 1);
        digits += frac_end - end - 1;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let exp_start = skip_sign(bytes, end + 1);
        let exp_end = skip_digits(bytes, exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }
    &input[..end]
}

fn skip_sign(bytes: &[u8], idx: usize) -> usize {
    match bytes.get(idx) {
        Some(b'+' | b'-') => idx + 1,
        _ => idx,
    }
}

fn skip_digits(bytes: &[u8], mut idx: usize) -> usize {
    while bytes.get(idx).is_some_and(u8::is_ascii_digit) {
        idx += 1;
    }
    idx
}

/// Reads an integer flag the way event markers are published: any non-zero
/// integer prefix raises the flag, while zero or text leaves it down.
pub fn parse_flag(raw: &str) -> bool {
    let trimmed = raw.trim_start();
    let bytes = trimmed.as_bytes();
    let start = skip_sign(bytes, 0);
    let end = skip_digits(bytes, start);
    bytes[start..end].iter().any(|&digit| digit != b'0')
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::from_hex(0xFF0000);
    const GREEN: Color = Color::from_hex(0x39E75F);
    const GRAY: Color = Color::from_hex(0x9E9E9E);

    const BANDS: &[Band] = &[
        Band::new(2.0, "warning", Style::new(Color::from_hex(0xFC6A03))),
        Band::new(3.0, "danger", Style::new(RED)),
    ];
    const DEFAULT: Band = Band::floor("normal", Style::new(GREEN));
    const NO_DATA: StyleResult = StyleResult::no_data(Style::new(GRAY), DisplayText::Replace("N/D"));

    fn level(raw: &str) -> &'static str {
        classify(raw, BANDS, &DEFAULT, &NO_DATA).level
    }

    #[test]
    fn color_formats_as_upper_hex() {
        assert_eq!(Color::from_hex(0x8b8000).to_string(), "#8B8000");
        assert_eq!(Color::from_hex(0x0a0b0c).rgb(), (10, 11, 12));
    }

    #[test]
    fn highest_qualifying_bound_wins() {
        assert_eq!(level("3.0"), "danger");
        assert_eq!(level("2.99"), "warning");
        assert_eq!(level("2"), "warning");
        assert_eq!(level("1.99"), "normal");
        assert_eq!(level("-4"), "normal");
    }

    #[test]
    fn unparsable_reading_is_no_data() {
        let result = classify("abc", BANDS, &DEFAULT, &NO_DATA);
        assert!(result.is_no_data());
        assert_eq!(result.style.background, GRAY);
        assert_eq!(result.display.apply("abc m"), "N/D");
        assert_eq!(level(""), NO_DATA_LEVEL);
        assert_eq!(level("   "), NO_DATA_LEVEL);
    }

    #[test]
    fn value_is_rounded_before_comparison() {
        assert_eq!(level("2.996"), "danger");
        assert_eq!(level("1.994"), "normal");
        assert_eq!(parse_reading("5.499"), Some(5.5));
        assert_eq!(parse_reading("14.995"), Some(14.99));
        assert_eq!(parse_reading("1.005"), Some(1.0));
    }

    #[test]
    fn parses_numeric_prefix_only() {
        assert_eq!(parse_reading("  6.0 m"), Some(6.0));
        assert_eq!(parse_reading("-1.25°C"), Some(-1.25));
        assert_eq!(parse_reading(".5"), Some(0.5));
        assert_eq!(parse_reading("7."), Some(7.0));
        assert_eq!(parse_reading("1e2x"), Some(100.0));
        assert_eq!(parse_reading("4e"), Some(4.0));
        assert_eq!(parse_reading("DRY"), None);
        assert_eq!(parse_reading("-"), None);
        assert_eq!(parse_reading("."), None);
        assert_eq!(parse_reading("inf"), None);
        assert_eq!(parse_reading("1e400"), None);
    }

    #[test]
    fn display_text_transforms_label() {
        assert_eq!(DisplayText::Unchanged.apply("3.1 m"), "3.1 m");
        assert_eq!(DisplayText::Truncate(8).apply("DRY DRY m (ODM)"), "DRY DRY ");
        assert_eq!(DisplayText::Truncate(8).apply("DRY"), "DRY");
    }

    #[test]
    fn style_renders_inline_css() {
        let style = Style::new(RED).with_text(Color::from_hex(0xFFFFFF)).with_font_size(11);
        assert_eq!(
            style.to_css(),
            "background-color: #FF0000; color: #FFFFFF; font-size: 11px;"
        );
        assert_eq!(Style::new(GREEN).to_css(), "background-color: #39E75F;");
    }

    #[test]
    fn ascending_check_rejects_unordered_tables() {
        assert!(is_ascending(BANDS));
        assert!(is_ascending(&[]));
        let reversed = [BANDS[1], BANDS[0]];
        assert!(!is_ascending(&reversed));
        let duplicated = [BANDS[0], BANDS[0]];
        assert!(!is_ascending(&duplicated));
    }

    #[test]
    fn flag_is_raised_by_non_zero_integer() {
        assert!(parse_flag("1"));
        assert!(parse_flag(" 2 events"));
        assert!(parse_flag("-1"));
        assert!(parse_flag("0010"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("0.9"));
        assert!(!parse_flag("yes"));
        assert!(!parse_flag(""));
    }
}
