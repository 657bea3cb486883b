//! Subcommands of the dcr CLI.

pub mod batch;
pub mod config;
pub mod process;

use std::path::Path;

use clap::Args;
use tracing::debug;

use dcr_core::models::config::{DcrConfig, LineTypeConfig};

/// Command-line overrides of the line-type configuration.
#[derive(Args, Debug, Default)]
pub struct DetectionArgs {
    /// Lines from the top of each page considered as headers (0 = off)
    #[arg(long)]
    header_lines: Option<usize>,

    /// Lines from the bottom of each page considered as footers (0 = off)
    #[arg(long)]
    footer_lines: Option<usize>,

    /// Maximum edit distance between header lines of consecutive pages
    #[arg(long)]
    header_distance: Option<usize>,

    /// Maximum edit distance between footer lines of consecutive pages
    #[arg(long)]
    footer_distance: Option<usize>,
}

impl DetectionArgs {
    /// Apply the overrides on top of a configuration.
    pub fn apply(&self, mut config: LineTypeConfig) -> LineTypeConfig {
        if let Some(lines) = self.header_lines {
            config.header_max_lines = lines;
        }
        if let Some(lines) = self.footer_lines {
            config.footer_max_lines = lines;
        }
        if let Some(distance) = self.header_distance {
            config.header_max_distance = distance;
        }
        if let Some(distance) = self.footer_distance {
            config.footer_max_distance = distance;
        }
        config
    }
}

/// Load the configuration file if given, else the one written by
/// `dcr config`, else the defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<DcrConfig> {
    load_config_or(config_path, &config::default_config_path())
}

fn load_config_or(config_path: Option<&str>, default_path: &Path) -> anyhow::Result<DcrConfig> {
    let config = match config_path {
        Some(path) => DcrConfig::from_file(Path::new(path))?,
        None if default_path.exists() => {
            debug!("Using configuration file {}", default_path.display());
            DcrConfig::from_file(default_path)?
        }
        None => DcrConfig::default(),
    };
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_only_given_values() {
        let args = DetectionArgs {
            footer_lines: Some(0),
            header_distance: Some(1),
            ..DetectionArgs::default()
        };

        let config = args.apply(LineTypeConfig::default());

        assert_eq!(config.header_max_lines, 3);
        assert_eq!(config.footer_max_lines, 0);
        assert_eq!(config.header_max_distance, 1);
        assert_eq!(config.footer_max_distance, 3);
    }

    #[test]
    fn test_default_config_file_is_used_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let default_path = dir.path().join("config.json");

        let config = load_config_or(None, &default_path).unwrap();
        assert_eq!(config.line_type, LineTypeConfig::default());

        std::fs::write(&default_path, r#"{"line_type": {"header_max_lines": 1}}"#).unwrap();
        let config = load_config_or(None, &default_path).unwrap();
        assert_eq!(config.line_type.header_max_lines, 1);
    }

    #[test]
    fn test_explicit_config_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let default_path = dir.path().join("default.json");
        let explicit = dir.path().join("explicit.json");
        std::fs::write(&default_path, r#"{"line_type": {"header_max_lines": 1}}"#).unwrap();
        std::fs::write(&explicit, r#"{"line_type": {"header_max_lines": 2}}"#).unwrap();

        let config = load_config_or(explicit.to_str(), &default_path).unwrap();

        assert_eq!(config.line_type.header_max_lines, 2);
    }
}
