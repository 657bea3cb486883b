//! Config command - manage the detection configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use dcr_core::models::config::DcrConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Write a configuration file with the default values
    Init {
        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Get a configuration value
    Get {
        /// Configuration key (e.g., "line_type.header_max_lines")
        key: String,
    },

    /// Set a numeric configuration value
    Set {
        /// Configuration key
        key: String,
        /// New value
        value: usize,
    },

    /// Show configuration file path
    Path,
}

pub fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    match args.command {
        ConfigCommand::Show => {
            let config = read_or_default(&path)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigCommand::Init { force } => init_config(&path, force)?,
        ConfigCommand::Get { key } => {
            let json = serde_json::to_value(read_or_default(&path)?)?;
            let value = json
                .pointer(&json_pointer(&key))
                .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
            println!("{}", value);
        }
        ConfigCommand::Set { key, value } => set_config(&path, &key, value)?,
        ConfigCommand::Path => {
            println!("Configuration file: {}", path.display());
            if path.exists() {
                println!("Status: {}", style("exists").green());
            } else {
                println!("Status: {}", style("not created").yellow());
                println!("Run 'dcr config init' to create a configuration file.");
            }
        }
    }

    Ok(())
}

/// Location of the configuration file when no `-c` path is given.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dcr")
        .join("config.json")
}

/// Turn a dotted key into a JSON pointer.
fn json_pointer(key: &str) -> String {
    key.split('.').map(|part| format!("/{}", part)).collect()
}

fn read_or_default(path: &Path) -> anyhow::Result<DcrConfig> {
    if path.exists() {
        Ok(DcrConfig::from_file(path)?)
    } else {
        Ok(DcrConfig::default())
    }
}

fn write_config(path: &Path, config: &DcrConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;
    Ok(())
}

fn init_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    write_config(path, &DcrConfig::default())?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        path.display()
    );

    Ok(())
}

fn set_config(path: &Path, key: &str, value: usize) -> anyhow::Result<()> {
    let mut json = serde_json::to_value(read_or_default(path)?)?;

    match json.pointer_mut(&json_pointer(key)) {
        Some(slot) if slot.is_number() => *slot = Value::from(value),
        Some(_) => anyhow::bail!("Configuration key is not a number: {}", key),
        None => anyhow::bail!("Configuration key not found: {}", key),
    }

    let config: DcrConfig = serde_json::from_value(json)?;
    write_config(path, &config)?;

    println!("{} Set {} = {}", style("✓").green(), key, value);

    Ok(())
}
