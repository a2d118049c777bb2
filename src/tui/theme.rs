use ratatui::style::Color;

use crate::model::UiConfig;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    /// Prompt, selection indicator, and matched characters
    pub highlight: Color,
    pub dim: Color,
    pub selected_bg: Color,
    pub breadcrumb: Color,
    pub status: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x1A, 0x1B, 0x26),
            text: Color::Rgb(0xA9, 0xB1, 0xD6),
            text_bright: Color::Rgb(0xC0, 0xCA, 0xF5),
            highlight: Color::Rgb(0xE0, 0xAF, 0x68),
            dim: Color::Rgb(0x56, 0x5F, 0x89),
            selected_bg: Color::Rgb(0x28, 0x34, 0x57),
            breadcrumb: Color::Rgb(0x7A, 0xA2, 0xF7),
            status: Color::Rgb(0x9E, 0xCE, 0x6A),
        }
    }
}

/// Parse a hex color string like "#E0AF68" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from the [ui.colors] config table, falling back to
    /// defaults for unknown keys and unparseable values
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();
        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "highlight" => theme.highlight = color,
                    "dim" => theme.dim = color,
                    "selected_bg" => theme.selected_bg = color,
                    "breadcrumb" => theme.breadcrumb = color,
                    "status" => theme.status = color,
                    _ => {}
                }
            }
        }
        theme
    }
}
