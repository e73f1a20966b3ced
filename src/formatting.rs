use colored::{ColoredString, Colorize};
use tidewatch::bands::{Color, Style};

pub fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.2}"),
        _ => "-".to_string(),
    }
}

/// Short text painted in the style's own colors.
pub fn swatch(style: &Style, text: &str) -> ColoredString {
    let (r, g, b) = style.background.rgb();
    let painted = text.on_truecolor(r, g, b);
    match style.text {
        Some(color) => {
            let (r, g, b) = color.rgb();
            painted.truecolor(r, g, b)
        }
        None => painted,
    }
}

pub fn describe_style(style: &Style) -> String {
    let text = style.text.as_ref().map_or_else(|| "-".to_string(), Color::to_string);
    match style.font_size_px {
        Some(px) => format!("{} / {text} / {px}px", style.background),
        None => format!("{} / {text}", style.background),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidewatch::metrics::{DRY_OLIVE, WHITE};

    #[test]
    fn missing_values_render_as_dash() {
        assert_eq!(format_value(None), "-");
        assert_eq!(format_value(Some(5.5)), "5.50");
    }

    #[test]
    fn style_description_lists_every_part() {
        let style = Style::new(DRY_OLIVE).with_text(WHITE).with_font_size(11);
        assert_eq!(describe_style(&style), "#8B8000 / #FFFFFF / 11px");
        assert_eq!(describe_style(&Style::new(WHITE)), "#FFFFFF / -");
    }
}
