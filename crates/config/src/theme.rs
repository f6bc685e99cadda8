// Color schemes
// Used for the HTML table view and for the terminal prompt and dialogs

use crate::Color;
use serde::{Deserialize, Serialize};

/// Colors for one scheme, as `#rrggbb` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
    /// Page and dialog background
    pub bg: String,
    /// Table border
    pub border: String,
    /// Header cells and titles
    pub title: String,
    /// Odd rows and plain text
    pub text1: String,
    /// Even rows and highlights
    pub text2: String,
}

/// Names accepted by `colorScheme`.
pub const SCHEME_NAMES: &[&str] = &["nord", "gruvbox", "dracula", "monokai", "palenight", "custom"];

fn scheme(bg: &str, border: &str, title: &str, text1: &str, text2: &str) -> ColorScheme {
    ColorScheme {
        bg: bg.into(),
        border: border.into(),
        title: title.into(),
        text1: text1.into(),
        text2: text2.into(),
    }
}

impl ColorScheme {
    pub fn nord() -> Self {
        scheme("#2e3440", "#4c566a", "#5e81ac", "#c2c8d3", "#81a1c1")
    }

    pub fn gruvbox() -> Self {
        scheme("#1d2021", "#3c3836", "#458588", "#83a598", "#d3869b")
    }

    pub fn dracula() -> Self {
        scheme("#282a36", "#44475a", "#ff79c6", "#8be9fd", "#ab86e2")
    }

    pub fn monokai() -> Self {
        scheme("#2c292d", "#908e8f", "#ab9df2", "#a9dc76", "#78dce8")
    }

    pub fn palenight() -> Self {
        scheme("#282a36", "#44475a", "#ff79c6", "#8be9fd", "#67d5f5")
    }

    /// Look up a built-in scheme by name (case-insensitive).
    ///
    /// `custom` uses `colors` when given; anything unknown, or `custom`
    /// without colors, falls back to Nord.
    pub fn resolve(name: &str, colors: Option<&ColorScheme>) -> Self {
        match name.to_lowercase().as_str() {
            "nord" => Self::nord(),
            "gruvbox" => Self::gruvbox(),
            "dracula" => Self::dracula(),
            "monokai" => Self::monokai(),
            "palenight" => Self::palenight(),
            "custom" => match colors {
                Some(colors) => colors.clone(),
                None => {
                    log::warn!("colorScheme is custom but no colors are set, using nord");
                    Self::nord()
                }
            },
            other => {
                log::warn!("unknown color scheme {:?}, using nord", other);
                Self::nord()
            }
        }
    }

    /// The scheme as CSS custom properties on `:root`.
    pub fn render_css(&self) -> String {
        format!(
            ":root {{\n    --bg-color: {};\n    --border-color: {};\n    --title-color: {};\n    --text-color: {};\n    --text-color-2: {};\n}}\n",
            self.bg, self.border, self.title, self.text1, self.text2
        )
    }

    /// Parse hex color to [`Color`]
    pub fn hex_to_color(hex: &str) -> Option<Color> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Color::from_rgb(r, g, b))
    }

    pub fn title_color(&self) -> Option<Color> {
        Self::hex_to_color(&self.title)
    }

    pub fn highlight_color(&self) -> Option<Color> {
        Self::hex_to_color(&self.text2)
    }

    pub fn text_color(&self) -> Option<Color> {
        Self::hex_to_color(&self.text1)
    }

    pub fn border_color(&self) -> Option<Color> {
        Self::hex_to_color(&self.border)
    }

    pub fn bg_color(&self) -> Option<Color> {
        Self::hex_to_color(&self.bg)
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::nord()
    }
}
