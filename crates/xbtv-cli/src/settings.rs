//! Editor settings, loaded from a TOML file.
//!
//! The default location is the platform-specific config folder:
//! - macOS: ~/Library/Application Support/org.xbtv.xbtved/
//! - Windows: %APPDATA%/xbtv/xbtved/config/
//! - Linux: ~/.config/xbtved/
//!
//! ```toml
//! [engine]
//! untitled_prefix = "schedule"
//! history_limit = 200
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use xbtv_core::EngineConfig;

const APP_QUALIFIER: &str = "org";
const APP_ORG: &str = "xbtv";
const APP_NAME: &str = "xbtved";
const CONFIG_FILENAME: &str = "settings.toml";

/// Editor settings (persisted to disk as TOML).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub engine: EngineConfig,
}

/// Get the path to the default settings file.
///
/// Returns `None` if the platform-specific directory cannot be determined.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Load settings from `explicit` if given, otherwise from the default path.
///
/// Never fails: a missing or unreadable file yields default settings.
pub fn load_settings(explicit: Option<&Path>) -> Settings {
    if let Some(path) = explicit {
        return load_settings_from(path);
    }
    match settings_path() {
        Some(path) => load_settings_from(&path),
        None => {
            tracing::warn!("Could not determine settings path, using defaults");
            Settings::default()
        }
    }
}

/// Load settings from a specific file, falling back to defaults.
pub fn load_settings_from(path: &Path) -> Settings {
    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                tracing::info!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                tracing::warn!("Failed to parse settings file {:?}: {}, using defaults", path, e);
                Settings::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("No settings file found at {:?}, using defaults", path);
            Settings::default()
        }
        Err(e) => {
            tracing::warn!("Failed to read settings file: {}, using defaults", e);
            Settings::default()
        }
    }
}
