use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use skugen_core::HISTORY_CAPACITY;
use skugen_logging::LevelFilter;
use thiserror::Error;

pub const DEFAULT_HISTORY_FILENAME: &str = ".skugen_history.ron";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse settings {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Host settings, read from an optional RON file. Fields left out keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub history_path: PathBuf,
    pub history_capacity: usize,
    pub require_confirmation: bool,
    pub log_level: LogLevel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            history_path: PathBuf::from(".").join(DEFAULT_HISTORY_FILENAME),
            history_capacity: HISTORY_CAPACITY,
            require_confirmation: true,
            log_level: LogLevel::Info,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path` when it exists, defaults otherwise.
    pub fn load_optional(path: &Path) -> Result<Self, SettingsError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
