//! Preferences for the breathe app
//!
//! Stored as pretty JSON in the platform config directory. Every field has a
//! default, so a partial or missing file still yields a usable configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Overrides the settings file location.
pub const CONFIG_ENV: &str = "BREATHE_CONFIG";

const FILE_NAME: &str = "breathe.json";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, SettingsError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreathSettings {
    /// Session lengths offered on screen, in milliseconds.
    pub durations_ms: Vec<u64>,
    /// Session length selected at launch.
    pub default_duration_ms: u64,
    /// Countdown step.
    pub tick_ms: u64,
    /// Time between inhale/exhale flips.
    pub breath_interval_ms: u64,
    /// Length of one pulse (fade + scale) transition.
    pub pulse_ms: u64,
    /// Logo scale at the top of a breath.
    pub pulse_scale_max: f32,
}

impl Default for BreathSettings {
    fn default() -> Self {
        Self {
            durations_ms: vec![60_000, 120_000, 180_000],
            default_duration_ms: 60_000,
            tick_ms: 1000,
            breath_interval_ms: 5000,
            pulse_ms: 5000,
            pulse_scale_max: 1.5,
        }
    }
}

impl BreathSettings {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn breath_interval(&self) -> Duration {
        Duration::from_millis(self.breath_interval_ms)
    }

    pub fn pulse(&self) -> Duration {
        Duration::from_millis(self.pulse_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_ms == 0 || self.breath_interval_ms == 0 {
            return Err(SettingsError::Invalid("intervals must be positive".into()));
        }
        if self.durations_ms.is_empty() {
            return Err(SettingsError::Invalid("no session durations".into()));
        }
        if let Some(bad) = self
            .durations_ms
            .iter()
            .find(|&&d| d == 0 || d % self.tick_ms != 0)
        {
            return Err(SettingsError::Invalid(format!(
                "duration {}ms is not a positive multiple of {}ms",
                bad, self.tick_ms
            )));
        }
        if !self.durations_ms.contains(&self.default_duration_ms) {
            return Err(SettingsError::Invalid(format!(
                "default duration {}ms is not one of the offered durations",
                self.default_duration_ms
            )));
        }
        if !(self.pulse_scale_max.is_finite() && self.pulse_scale_max >= 1.0) {
            return Err(SettingsError::Invalid("pulse scale must be at least 1.0".into()));
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&contents)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Load from `path`, falling back to defaults on any problem. A missing
    /// file is seeded with the defaults so there is something to edit.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => {
                debug!(path = %path.display(), "loaded settings");
                settings
            }
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, writing defaults");
                let settings = Self::default();
                if let Err(e) = settings.save(path) {
                    warn!(path = %path.display(), error = %e, "could not write default settings");
                }
                settings
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring settings file");
                Self::default()
            }
        }
    }
}

/// Where the settings file lives: `$BREATHE_CONFIG` if set, otherwise the
/// platform config directory.
pub fn settings_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    directories::ProjectDirs::from("", "", "breathe")
        .map(|p| p.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/breathe"))
        .join(FILE_NAME)
}
