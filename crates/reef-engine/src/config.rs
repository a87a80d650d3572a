//! TOML configuration for embedding applications.
//!
//! ```toml
//! [car]
//! index_offsets = "byte"   # or "ordinal"
//!
//! [log]
//! level = "info"
//! ```

use std::path::Path;

use reef_types::{ArchiveConfig, IndexOffsetMode};
use serde::Deserialize;

/// Top-level configuration, parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReefConfig {
    /// Container output settings.
    pub car: CarSection,
    /// Logging configuration.
    pub log: LogSection,
}

/// `[car]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CarSection {
    /// What the v2 index records for each block.
    pub index_offsets: IndexOffsetMode,
}

/// `[log]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// Log level filter (e.g. `"info"`, `"debug"`, `"warn"`).
    pub level: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ReefConfig {
    /// Load config from a TOML file, or use defaults if no path given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(p) => {
                let content = std::fs::read_to_string(p)?;
                Self::from_toml(&content)
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse config from a TOML string.
    pub fn from_toml(s: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Build parameters for [`ArchiveBuilder`](crate::ArchiveBuilder).
    pub fn archive_config(&self) -> ArchiveConfig {
        ArchiveConfig {
            index_offsets: self.car.index_offsets,
        }
    }
}
