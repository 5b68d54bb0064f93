use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawCacheSettings {
    #[serde(default)]
    pub backend: BackendSetting,
    #[serde(default = "DrawCacheSettings::default_batch_label")]
    pub batch_label: String,
    #[serde(default)]
    pub power_preference: PowerPreferenceSetting,
}

impl Default for DrawCacheSettings {
    fn default() -> Self {
        Self {
            backend: BackendSetting::default(),
            batch_label: Self::default_batch_label(),
            power_preference: PowerPreferenceSetting::default(),
        }
    }
}

impl DrawCacheSettings {
    pub fn load() -> Self {
        Self::load_from_path("draw_cache.json")
    }

    /// Settings from `path`, or defaults when the file is absent or unusable.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::read(path) {
            Ok(settings) => {
                info!("Loaded draw cache settings from {:?}", path);
                settings.validate()
            }
            Err(SettingsError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                info!("No draw cache settings at {:?}, using defaults", path);
                Self::default()
            }
            Err(err) => {
                warn!("{} in {:?}. Using default draw cache settings.", err, path);
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn validate(mut self) -> Self {
        let trimmed = self.batch_label.trim();
        if trimmed.is_empty() {
            warn!(
                "batch_label {:?} is blank, replaced with {:?}",
                self.batch_label,
                Self::default_batch_label()
            );
            self.batch_label = Self::default_batch_label();
        } else if trimmed.len() != self.batch_label.len() {
            warn!("batch_label {:?} trimmed to {:?}", self.batch_label, trimmed);
            self.batch_label = trimmed.to_string();
        }

        self
    }

    fn default_batch_label() -> String {
        "MetaBall.Surface".to_string()
    }
}

#[derive(Debug)]
enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "Read error ({})", e),
            SettingsError::Parse(e) => write!(f, "Parse error ({})", e),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendSetting {
    /// Try a GPU device first, fall back to system memory.
    #[default]
    Auto,
    Cpu,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerPreferenceSetting {
    #[default]
    LowPower,
    HighPerformance,
}

impl PowerPreferenceSetting {
    pub fn to_wgpu(self) -> wgpu::PowerPreference {
        match self {
            PowerPreferenceSetting::LowPower => wgpu::PowerPreference::LowPower,
            PowerPreferenceSetting::HighPerformance => wgpu::PowerPreference::HighPerformance,
        }
    }
}
