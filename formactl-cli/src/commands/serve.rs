//! HTTP server command for the reference data API

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use formactl_server::db::migrations;
use formactl_server::{run_server, AppState, PgReferenceStore, ServerConfig};

use super::DatabaseArgs;
use crate::config::FormactlConfig;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:3030)
    #[arg(long, short = 'b', env = "FORMACTL_BIND")]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Seconds a reference snapshot is served before refreshing (default: 300)
    #[arg(long, env = "FORMACTL_CACHE_TTL_SECS")]
    pub cache_ttl_secs: Option<u64>,

    /// Per-read store timeout in seconds (default: 10)
    #[arg(long, env = "FORMACTL_QUERY_TIMEOUT_SECS")]
    pub query_timeout_secs: Option<u64>,

    /// Run migrations before serving
    #[arg(long)]
    pub migrate: bool,

    #[command(flatten)]
    pub db: DatabaseArgs,
}

impl ServeArgs {
    /// Merge flags/env with the config file over the server defaults
    pub fn server_config(&self, file: &FormactlConfig) -> Result<ServerConfig> {
        let defaults = ServerConfig::default();

        let bind_addr = match (self.bind, file.bind.as_deref()) {
            (Some(addr), _) => addr,
            (None, Some(raw)) => raw
                .parse()
                .with_context(|| format!("Invalid bind address in config file: {raw}"))?,
            (None, None) => defaults.bind_addr,
        };

        let cache_ttl = self
            .cache_ttl_secs
            .or(file.cache_ttl_secs)
            .map(Duration::from_secs)
            .unwrap_or(defaults.cache_ttl);

        let query_timeout = self
            .query_timeout_secs
            .or(file.query_timeout_secs)
            .map(Duration::from_secs)
            .unwrap_or(defaults.query_timeout);

        if query_timeout.is_zero() {
            anyhow::bail!("query timeout must be at least one second");
        }

        Ok(ServerConfig {
            bind_addr,
            cors_permissive: self.cors_permissive || file.cors_permissive.unwrap_or(false),
            cache_ttl,
            query_timeout,
        })
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let file = FormactlConfig::load()?;
    let config = args.server_config(&file)?;

    tracing::info!("Starting formactl server on {}", config.bind_addr);

    let pool = args.db.connect(&file).await?;
    if args.migrate {
        migrations::run(&pool)
            .await
            .context("Failed to run migrations")?;
    }

    let state = AppState::new(Arc::new(PgReferenceStore::new(pool)), &config);

    // Run server (blocks until shutdown)
    run_server(state, config).await.context("Server error")?;

    Ok(())
}
