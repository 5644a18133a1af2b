use std::collections::HashMap;

use ratatui::style::Color;

use crate::model::UiConfig;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub selection_bg: Color,
    /// Chip colour per class name
    pub class_colors: HashMap<String, Color>,
}

impl Default for Theme {
    fn default() -> Self {
        let mut class_colors = HashMap::new();
        class_colors.insert("label-default".into(), Color::Rgb(0x7D, 0x78, 0xBF));
        class_colors.insert("label-primary".into(), Color::Rgb(0x44, 0x88, 0xFF));
        class_colors.insert("label-info".into(), Color::Rgb(0x44, 0xDD, 0xFF));
        class_colors.insert("label-success".into(), Color::Rgb(0x44, 0xFF, 0x88));
        class_colors.insert("label-warning".into(), Color::Rgb(0xFF, 0xD7, 0x00));
        class_colors.insert("label-danger".into(), Color::Rgb(0xFF, 0x44, 0x44));

        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
            class_colors,
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
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
    /// Create a theme from the `[ui]` config table, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                log::warn!("ignoring colour {:?} = {:?}", key, value);
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "highlight" => theme.highlight = color,
                "dim" => theme.dim = color,
                "selection_bg" => theme.selection_bg = color,
                _ => {}
            }
        }

        for (class, value) in &ui.class_colors {
            if let Some(color) = parse_hex_color(value) {
                theme.class_colors.insert(class.clone(), color);
            }
        }

        theme
    }

    /// Colour of a chip: the first of its classes that has one, else the
    /// text colour.
    pub fn chip_color(&self, classes: &str) -> Color {
        classes
            .split_whitespace()
            .find_map(|c| self.class_colors.get(c).copied())
            .unwrap_or(self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(
            parse_hex_color("#44DDFF"),
            Some(Color::Rgb(0x44, 0xDD, 0xFF))
        );
        assert_eq!(parse_hex_color("44DDFF"), None);
        assert_eq!(parse_hex_color("#44DD"), None);
        assert_eq!(parse_hex_color("#GG0000"), None);
    }

    #[test]
    fn test_chip_color_uses_first_known_class() {
        let theme = Theme::default();
        assert_eq!(
            theme.chip_color("label label-danger"),
            Color::Rgb(0xFF, 0x44, 0x44)
        );
        assert_eq!(
            theme.chip_color("label-success label-danger"),
            Color::Rgb(0x44, 0xFF, 0x88)
        );
        assert_eq!(theme.chip_color("nothing here"), theme.text);
        assert_eq!(theme.chip_color(""), theme.text);
    }

    #[test]
    fn test_from_config_overrides() {
        let mut ui = UiConfig::default();
        ui.colors.insert("background".into(), "#000000".into());
        ui.colors.insert("text".into(), "not a colour".into());
        ui.class_colors.insert("vip".into(), "#112233".into());

        let theme = Theme::from_config(&ui);
        assert_eq!(theme.background, Color::Rgb(0, 0, 0));
        assert_eq!(theme.text, Theme::default().text);
        assert_eq!(theme.chip_color("vip"), Color::Rgb(0x11, 0x22, 0x33));
    }
}
