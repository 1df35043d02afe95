//! Study session configuration

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::grading::DEFAULT_THRESHOLD;

/// Session settings, typically read from a JSON file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudyConfig {
    /// SQLite file holding progress and review state; `None` keeps state in memory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_path: Option<PathBuf>,
    /// Shuffle the card queue each time it is refilled
    pub shuffle_queue: bool,
    /// Fixed seed for quiz and queue randomness
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz_seed: Option<u64>,
    /// Minimum similarity for a typed answer to count as correct
    pub answer_threshold: f64,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            shuffle_queue: false,
            quiz_seed: None,
            answer_threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl StudyConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: StudyConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.answer_threshold) {
            return Err(ConfigError::InvalidThreshold(self.answer_threshold));
        }
        Ok(())
    }
}
