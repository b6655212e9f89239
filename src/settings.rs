//! Generator settings
//!
//! Read from `virgo.toml` in the working directory, then
//! `~/.config/virgo/settings.toml`. Settings never change the output
//! file; they only control what happens around writing it.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Settings file looked up in the working directory first
const LOCAL_SETTINGS: &str = "virgo.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Re-read and validate the file after writing
    pub verify: bool,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self { verify: true }
    }
}

impl GeneratorSettings {
    /// Get the user config file path
    fn user_settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("virgo").join("settings.toml"))
    }

    /// Load settings from the local file, then the user config, or return
    /// defaults
    pub fn load() -> Self {
        let candidates: Vec<PathBuf> = std::iter::once(PathBuf::from(LOCAL_SETTINGS))
            .chain(Self::user_settings_path())
            .collect();
        Self::load_first(&candidates)
    }

    /// Load the first existing file in `candidates`. Later files are not
    /// consulted, even when the first one fails to parse.
    pub fn load_first(candidates: &[PathBuf]) -> Self {
        let Some(path) = candidates.iter().find(|p| p.exists()) else {
            info!("No settings file found, using defaults");
            return Self::default();
        };

        Self::load_from(path).unwrap_or_default()
    }

    /// Parse one settings file. Read or parse failures are logged and
    /// yield `None`.
    pub fn load_from(path: &Path) -> Option<Self> {
        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    Some(settings)
                }
                Err(e) => {
                    warn!("Failed to parse settings {:?}: {}, using defaults", path, e);
                    None
                }
            },
            Err(e) => {
                warn!("Failed to read settings file {:?}: {}, using defaults", path, e);
                None
            }
        }
    }
}
