//! Run configuration for bigram extraction.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{BigramError, Result};

/// Settings shared by the pipeline driver and its workers.
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```toml
/// vocabulary_path = "dict/data.json"
/// workers = 4
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// JSON object whose keys form the admissible second-word set.
    pub vocabulary_path: PathBuf,
    /// Where the ranked artifact is written.
    pub output_path: PathBuf,
    /// Size of the worker pool.
    pub workers: usize,
    /// Records whose summed frequency is at or below this are noise.
    pub noise_threshold: u64,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            vocabulary_path: PathBuf::from("data.json"),
            output_path: PathBuf::from("bigrams.json"),
            workers: 12,
            noise_threshold: 2,
        }
    }
}

impl ExtractConfig {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| BigramError::configuration(path, e.to_string()))?;
        let config =
            Self::from_toml_str(&content).map_err(|e| BigramError::configuration(path, e.to_string()))?;
        config
            .check()
            .map_err(|reason| BigramError::configuration(path, reason))?;
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Reject settings the driver cannot run with.
    pub fn validate(&self) -> Result<()> {
        self.check()
            .map_err(|reason| BigramError::InvalidSetting(reason.to_string()))
    }

    fn check(&self) -> std::result::Result<(), &'static str> {
        if self.workers == 0 {
            return Err("workers must be at least 1");
        }
        Ok(())
    }
}
