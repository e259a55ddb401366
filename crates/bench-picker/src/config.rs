//! Configuration file loading for the picker.
//!
//! Settings live in `bench-picker.toml` in the current directory. Every
//! field is optional, and a missing file means defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::input::FALLBACK_INPUT;
use crate::sampler::DEFAULT_TARGET;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Picker settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct PickerConfig {
    /// Number of positions to pick. Defaults to 100.
    #[serde(default = "default_target")]
    pub target: usize,
    /// File read when stdin is a terminal. Defaults to `fens.txt`.
    #[serde(default = "default_fallback_input")]
    pub fallback_input: PathBuf,
    /// Seed for reproducible picks. Unseeded by default.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_target() -> usize {
    DEFAULT_TARGET
}

fn default_fallback_input() -> PathBuf {
    PathBuf::from(FALLBACK_INPUT)
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            target: default_target(),
            fallback_input: default_fallback_input(),
            seed: None,
        }
    }
}

impl PickerConfig {
    /// Loads the configuration from [`Self::config_path()`], or defaults if
    /// that file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads the configuration from a file that must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Returns the path to the configuration file.
    pub fn config_path() -> PathBuf {
        PathBuf::from("bench-picker.toml")
    }
}
