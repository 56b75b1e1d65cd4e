//! Player settings.
//!
//! Persisted as JSON next to the high score in `$HOME/.galaxy_retro`.
//! `GALAXY_RETRO_DEVICE` overrides the device class for one run.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::entities::DeviceClass;

/// Environment variable that forces a device class.
pub const DEVICE_ENV: &str = "GALAXY_RETRO_DEVICE";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Sizing and control scheme.
    pub device: DeviceClass,
    /// Where the high score lives; defaults to the data directory.
    pub high_score_file: Option<PathBuf>,
}

impl Settings {
    const FILE_NAME: &'static str = "settings.json";
    const HIGH_SCORE_FILE_NAME: &'static str = "high_score.json";

    /// `$HOME/.galaxy_retro`, or `./.galaxy_retro` without a home directory.
    pub fn data_dir() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".galaxy_retro")
    }

    /// Load from the data directory and apply the environment override.
    pub fn load() -> Self {
        let settings = Self::load_from(&Self::data_dir().join(Self::FILE_NAME));
        settings.with_device_override(std::env::var(DEVICE_ENV).ok().as_deref())
    }

    /// Read settings from `path`, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        let Ok(json) = fs::read_to_string(path) else {
            log::info!("Using default settings");
            return Self::default();
        };
        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Replace the device class with `value` when it names one.
    pub fn with_device_override(mut self, value: Option<&str>) -> Self {
        match value.map(|v| (v, DeviceClass::parse(v))) {
            Some((_, Some(device))) => self.device = device,
            Some((raw, None)) => log::warn!("Ignoring unknown {}={:?}", DEVICE_ENV, raw),
            None => {}
        }
        self
    }

    pub fn high_score_path(&self) -> PathBuf {
        self.high_score_file
            .clone()
            .unwrap_or_else(|| Self::data_dir().join(Self::HIGH_SCORE_FILE_NAME))
    }
}
