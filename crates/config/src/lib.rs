// Configuration loading

pub mod keybindings;
pub mod settings;
pub mod theme;

pub use keybindings::{KeyAction, KeyBindings, KeyChord, Modifier};
pub use settings::{NamedFiles, Settings, SettingsError};
pub use theme::ColorScheme;

/// Framework-agnostic RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert from hex u32 (0xRRGGBB)
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as u8;
        let g = ((hex >> 8) & 0xFF) as u8;
        let b = (hex & 0xFF) as u8;
        Self { r, g, b }
    }
}
