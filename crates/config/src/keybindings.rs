// Prompt key bindings
// Chords are written as "m-<key>" (Alt) or "c-<key>" (Ctrl), e.g. "m-c"

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Alt,
    Ctrl,
}

/// A modifier plus a single lowercase key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    pub modifier: Modifier,
    pub key: char,
}

impl KeyChord {
    pub const fn alt(key: char) -> Self {
        Self { modifier: Modifier::Alt, key }
    }

    /// Parse "m-x", "c-x", "alt+x" or "ctrl+x". A bare key means Alt.
    pub fn parse(spec: &str) -> Option<Self> {
        let spec = spec.trim().to_lowercase();
        let (modifier, key) = match spec.split_once(['-', '+']) {
            Some(("m" | "alt" | "meta" | "escape", key)) => (Modifier::Alt, key),
            Some(("c" | "ctrl" | "control", key)) => (Modifier::Ctrl, key),
            Some(_) => return None,
            None => (Modifier::Alt, spec.as_str()),
        };

        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(key), None) if !key.is_whitespace() => Some(Self { modifier, key }),
            _ => None,
        }
    }

    pub fn matches(&self, modifier: Modifier, key: char) -> bool {
        self.modifier == modifier && self.key == key.to_ascii_lowercase()
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.modifier {
            Modifier::Alt => write!(f, "Alt+{}", self.key),
            Modifier::Ctrl => write!(f, "Ctrl+{}", self.key),
        }
    }
}

/// What a bound chord does at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    ClearScreen,
    ListNamedFiles,
    Help,
    ShowTable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub clear: KeyChord,
    pub list: KeyChord,
    pub help: KeyChord,
    pub show: KeyChord,
}

pub const DEFAULT_CLEAR_KEY: &str = "m-c";
pub const DEFAULT_LIST_KEY: &str = "m-l";
pub const DEFAULT_HELP_KEY: &str = "m-h";
pub const DEFAULT_SHOW_KEY: &str = "m-s";

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            clear: KeyChord::alt('c'),
            list: KeyChord::alt('l'),
            help: KeyChord::alt('h'),
            show: KeyChord::alt('s'),
        }
    }
}

impl KeyBindings {
    /// Build bindings from their textual form; unparsable entries keep the default.
    pub fn from_specs(clear: &str, list: &str, help: &str, show: &str) -> Self {
        let defaults = Self::default();
        Self {
            clear: parse_or(clear, defaults.clear),
            list: parse_or(list, defaults.list),
            help: parse_or(help, defaults.help),
            show: parse_or(show, defaults.show),
        }
    }

    pub fn action_for(&self, modifier: Modifier, key: char) -> Option<KeyAction> {
        [
            (self.clear, KeyAction::ClearScreen),
            (self.list, KeyAction::ListNamedFiles),
            (self.help, KeyAction::Help),
            (self.show, KeyAction::ShowTable),
        ]
        .into_iter()
        .find(|(chord, _)| chord.matches(modifier, key))
        .map(|(_, action)| action)
    }
}

fn parse_or(spec: &str, default: KeyChord) -> KeyChord {
    KeyChord::parse(spec).unwrap_or_else(|| {
        log::warn!("invalid key binding {:?}, using {}", spec, default);
        default
    })
}
