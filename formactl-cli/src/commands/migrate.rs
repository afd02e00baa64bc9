//! Create the reference tables

use anyhow::{Context, Result};
use clap::Parser;
use formactl_server::db::migrations;

use super::DatabaseArgs;
use crate::config::FormactlConfig;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub db: DatabaseArgs,
}

pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let file = FormactlConfig::load()?;
    let pool = args.db.connect(&file).await?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    println!("✅ Reference tables are up to date");
    Ok(())
}
