//! Command implementations for formactl CLI

pub mod inspect;
pub mod migrate;
pub mod seed;
pub mod serve;

use anyhow::{Context, Result};
use clap::Args;
use formactl_server::db::{create_pool, create_pool_with_options, PgPool};

use crate::config::FormactlConfig;

// Re-export main dispatcher functions for flat access from main.rs
pub use inspect::run_inspect;
pub use migrate::run_migrate;
pub use seed::run_seed;
pub use serve::run_serve;

/// Database connection flag shared by every command that touches the store
#[derive(Args, Debug, Clone, Default)]
pub struct DatabaseArgs {
    /// Database URL (overrides config file)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pool connections (default: 6)
    #[arg(long, env = "FORMACTL_MAX_CONNECTIONS")]
    pub max_connections: Option<u32>,
}

impl DatabaseArgs {
    /// Flag/env first, then the config file
    pub fn resolve(&self, file: &FormactlConfig) -> Result<String> {
        self.database_url
            .clone()
            .or_else(|| file.database_url.clone())
            .context(
                "DATABASE_URL not set. Set via --database-url, DATABASE_URL env, .env, or ~/.formactl/config.toml",
            )
    }

    /// Pool size override, flag/env first, then the config file
    pub fn max_connections(&self, file: &FormactlConfig) -> Option<u32> {
        self.max_connections.or(file.max_connections)
    }

    pub async fn connect(&self, file: &FormactlConfig) -> Result<PgPool> {
        let url = self.resolve(file)?;
        let pool = match self.max_connections(file) {
            Some(0) => anyhow::bail!("max connections must be at least 1"),
            Some(max) => create_pool_with_options(&url, max).await,
            None => create_pool(&url).await,
        };
        pool.context("Failed to create database pool")
    }
}
