// Application settings
// Loaded from ~/.config/csvsh/config.json

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::keybindings::{
    KeyBindings, DEFAULT_CLEAR_KEY, DEFAULT_HELP_KEY, DEFAULT_LIST_KEY, DEFAULT_SHOW_KEY,
};
use crate::theme::ColorScheme;

#[derive(Debug)]
pub enum SettingsError {
    /// No settings file at the path
    Missing(PathBuf),
    Io(String),
    Parse(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Missing(_) => write!(f, "There's no settings file!"),
            SettingsError::Io(msg) => write!(f, "Could not read the settings file: {}", msg),
            SettingsError::Parse(msg) => write!(f, "The settings file is not valid: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {}

/// Short names for files the user loads often.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamedFiles(BTreeMap<String, String>);

impl NamedFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, path: impl Into<String>) {
        self.0.insert(name.into(), path.into());
    }

    /// The path registered under `name`, or `name` itself.
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.0.get(name).map(String::as_str).unwrap_or(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, path)| (name.as_str(), path.as_str()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Appearance
    #[serde(rename = "colorScheme")]
    pub color_scheme: String,

    /// Only read when `colorScheme` is "custom"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<ColorScheme>,

    // Files
    pub named_files: NamedFiles,

    // Keyboard
    pub clear_key: String,
    pub list_key: String,
    pub help_key: String,
    pub show_key: String,

    // Lookup
    pub strict_columns: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color_scheme: "nord".to_string(),
            colors: None,
            named_files: NamedFiles::new(),
            clear_key: DEFAULT_CLEAR_KEY.to_string(),
            list_key: DEFAULT_LIST_KEY.to_string(),
            help_key: DEFAULT_HELP_KEY.to_string(),
            show_key: DEFAULT_SHOW_KEY.to_string(),
            strict_columns: false,
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("csvsh");
        config_dir.join("config.json")
    }

    /// Load settings from the default path. See [`Settings::load_from`].
    pub fn load() -> (Self, Option<SettingsError>) {
        Self::load_from(&Self::config_path())
    }

    /// Load settings, falling back to defaults.
    ///
    /// The error, if any, is returned alongside so the caller can warn about
    /// it. A missing file is created with the default contents.
    pub fn load_from(path: &Path) -> (Self, Option<SettingsError>) {
        match Self::read(path) {
            Ok(settings) => (settings, None),
            Err(err) => {
                if let SettingsError::Missing(_) = err {
                    if let Err(e) = create_default_file(path) {
                        log::warn!("could not create {}: {}", path.display(), e);
                    }
                } else {
                    log::warn!("using default settings: {}", err);
                }
                (Self::default(), Some(err))
            }
        }
    }

    /// Read and parse `path` without any fallback.
    pub fn read(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Err(SettingsError::Missing(path.to_path_buf()));
        }
        let contents = fs::read_to_string(path).map_err(|e| SettingsError::Io(e.to_string()))?;
        Self::parse(&contents)
    }

    /// Parse settings JSON. Lines starting with `//` are comments.
    pub fn parse(contents: &str) -> Result<Self, SettingsError> {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");

        // An empty file behaves like `{}`
        if cleaned.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(&cleaned).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    pub fn scheme(&self) -> ColorScheme {
        ColorScheme::resolve(&self.color_scheme, self.colors.as_ref())
    }

    pub fn key_bindings(&self) -> KeyBindings {
        KeyBindings::from_specs(&self.clear_key, &self.list_key, &self.help_key, &self.show_key)
    }
}

const DEFAULT_CONFIG: &str = r##"{
    // Color scheme for the prompt, dialogs and the HTML table view
    // Options: "nord", "gruvbox", "dracula", "monokai", "palenight", "custom"
    "colorScheme": "nord",

    // Used only with "custom"
    // "colors": { "bg": "#2e3440", "border": "#4c566a", "title": "#5e81ac", "text1": "#c2c8d3", "text2": "#81a1c1" },

    // Names usable with load, e.g. "load sales"
    "named_files": {},

    // Key bindings ("m-x" = Alt+x, "c-x" = Ctrl+x)
    "clear_key": "m-c",
    "list_key": "m-l",
    "help_key": "m-h",
    "show_key": "m-s",

    // Treat duplicate column names as an error instead of using the first
    "strict_columns": false
}
"##;

fn create_default_file(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, DEFAULT_CONFIG)
}
