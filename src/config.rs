//! Input configuration persisted as a toml file in the user config dir.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::pad::backend::{LEFT_STICK_DEADZONE, RIGHT_STICK_DEADZONE};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not resolve the user config directory")]
    MissingConfigDir,

    #[error("Failed to read or write config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Tunables for the polling layer and the demo loop.
///
/// Missing fields in the file fall back to the defaults, so hand-edited
/// partial files stay valid.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Deadzone radius for the left stick, as a fraction of full deflection.
    pub left_stick_deadzone: f32,

    /// Deadzone radius for the right stick.
    pub right_stick_deadzone: f32,

    /// Master switch for rumble commands.
    pub rumble_enabled: bool,

    /// Poll loop interval in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            left_stick_deadzone: LEFT_STICK_DEADZONE,
            right_stick_deadzone: RIGHT_STICK_DEADZONE,
            rumble_enabled: true,
            poll_interval_ms: 16,
        }
    }
}

impl InputConfig {
    /// Default location: `<user config dir>/quadpad/input.toml`.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join("quadpad").join("input.toml"))
            .ok_or(ConfigError::MissingConfigDir)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        debug!("loading input config from {}", path.display());
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        debug!("saved input config to {}", path.display());
        Ok(())
    }

    /// Loads the config from the default location, writing the defaults
    /// there first if no file exists yet.
    pub fn ensure_default() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            info!(
                "no input config found, writing defaults to {}",
                path.display()
            );
            let config = InputConfig::default();
            config.save_to(&path)?;
            Ok(config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_vendor_deadzones() {
        let config = InputConfig::default();
        assert_eq!(config.left_stick_deadzone, LEFT_STICK_DEADZONE);
        assert_eq!(config.right_stick_deadzone, RIGHT_STICK_DEADZONE);
        assert!(config.rumble_enabled);
    }

    #[test]
    fn toml_round_trip() {
        let config = InputConfig {
            left_stick_deadzone: 0.3,
            right_stick_deadzone: 0.25,
            rumble_enabled: false,
            poll_interval_ms: 8,
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: InputConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let parsed: InputConfig = toml::from_str("rumble_enabled = false").unwrap();
        assert!(!parsed.rumble_enabled);
        assert_eq!(parsed.left_stick_deadzone, LEFT_STICK_DEADZONE);
        assert_eq!(parsed.poll_interval_ms, 16);
    }

    #[test]
    fn save_and_load_from_disk() {
        let path = std::env::temp_dir()
            .join("quadpad-config-test")
            .join("input.toml");
        let config = InputConfig {
            poll_interval_ms: 33,
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        let loaded = InputConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
