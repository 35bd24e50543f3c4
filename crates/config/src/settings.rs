// User settings
// Loaded from $GRIDCMP_CONFIG, else ~/.config/gridcmp/config.toml

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use gridcmp_engine::{ScanAnchor, Tolerance};
use serde::{Deserialize, Serialize};

/// Environment variable naming an explicit settings file.
pub const CONFIG_ENV: &str = "GRIDCMP_CONFIG";

/// When console output is colored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color only when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorMode::Auto => "auto",
            ColorMode::Always => "always",
            ColorMode::Never => "never",
        }
    }

    pub fn enabled(&self, is_terminal: bool) -> bool {
        match self {
            ColorMode::Auto => is_terminal,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            other => Err(format!(
                "invalid color mode '{}' (expected auto, always or never)",
                other
            )),
        }
    }
}

/// Settings file contents. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Numeric tolerance; unset means the built-in default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,

    pub color: ColorMode,

    /// Where the scan rectangle starts when only one side has data
    pub anchor: ScanAnchor,
}

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "error reading {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "error parsing {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        if let Some(explicit) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
            return PathBuf::from(explicit);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gridcmp")
            .join("config.toml")
    }

    /// Load settings from the default location, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from `path`. A missing file gives defaults silently;
    /// an unreadable or malformed one gives defaults with a warning.
    pub fn load_from(path: &Path) -> Self {
        match Self::try_load_from(path) {
            Ok(Some(settings)) => settings,
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// `Ok(None)` when the file does not exist.
    pub fn try_load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ConfigError::Read { path: path.to_path_buf(), source: e }),
        };
        toml::from_str(&contents)
            .map(Some)
            .map_err(|e| ConfigError::Parse { path: path.to_path_buf(), source: e })
    }

    /// The configured tolerance, if set and valid. An invalid value is
    /// ignored with a warning.
    pub fn tolerance(&self) -> Option<Tolerance> {
        let value = self.tolerance?;
        match Tolerance::new(value) {
            Ok(t) => Some(t),
            Err(e) => {
                log::warn!("ignoring tolerance in settings: {}", e);
                None
            }
        }
    }
}
