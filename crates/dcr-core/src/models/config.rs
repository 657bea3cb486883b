//! Configuration structures for the line-type classifiers.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Main configuration for the dcr pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DcrConfig {
    /// Line-type classification configuration.
    pub line_type: LineTypeConfig,
}

/// Header/footer classification configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineTypeConfig {
    /// Number of lines from the top of each page considered as header candidates (0 = disabled).
    pub header_max_lines: usize,

    /// Number of lines from the bottom of each page considered as footer candidates (0 = disabled).
    pub footer_max_lines: usize,

    /// Maximum edit distance (inclusive) between header lines of consecutive pages.
    pub header_max_distance: usize,

    /// Maximum edit distance (inclusive) between footer lines of consecutive pages.
    pub footer_max_distance: usize,
}

impl Default for LineTypeConfig {
    fn default() -> Self {
        Self {
            header_max_lines: 3,
            footer_max_lines: 3,
            header_max_distance: 3,
            footer_max_distance: 3,
        }
    }
}

impl LineTypeConfig {
    /// Returns `false` when neither headers nor footers are to be detected.
    pub fn is_enabled(&self) -> bool {
        self.header_max_lines > 0 || self.footer_max_lines > 0
    }
}

impl DcrConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
