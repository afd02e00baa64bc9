//! Config file support (`~/.formactl/config.toml`)
//!
//! Precedence: CLI flag > environment variable > config file > default.
//! Flags and env vars are handled by clap; this module supplies the file
//! layer and the `config` subcommand.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

/// Optional settings read from the config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormactlConfig {
    pub database_url: Option<String>,
    pub bind: Option<String>,
    pub cache_ttl_secs: Option<u64>,
    pub query_timeout_secs: Option<u64>,
    pub cors_permissive: Option<bool>,
    pub max_connections: Option<u32>,
}

impl FormactlConfig {
    /// Config file location, `FORMACTL_CONFIG` wins over the home default
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("FORMACTL_CONFIG") {
            return PathBuf::from(path);
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".formactl")
            .join("config.toml")
    }

    /// Load from the default location; a missing file yields defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show config file path
    Path,
    /// Show values read from the config file
    Show,
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Path => {
            println!("{}", FormactlConfig::config_path().display());
            Ok(())
        }
        ConfigCommands::Show => {
            let config = FormactlConfig::load()?;
            let rendered =
                toml::to_string_pretty(&config).context("Failed to render config")?;
            if rendered.trim().is_empty() {
                println!("# no values set in {}", FormactlConfig::config_path().display());
            } else {
                print!("{rendered}");
            }
            Ok(())
        }
    }
}
