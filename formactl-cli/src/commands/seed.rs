//! Insert the default reference rows
//!
//! Runs migrations first so a blank database can be seeded in one step.

use anyhow::{Context, Result};
use clap::Parser;
use formactl_server::db::{migrations, seed};

use super::DatabaseArgs;
use crate::config::FormactlConfig;

/// Arguments for the seed command
#[derive(Parser, Debug)]
pub struct SeedArgs {
    #[command(flatten)]
    pub db: DatabaseArgs,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run_seed(args: SeedArgs) -> Result<()> {
    let file = FormactlConfig::load()?;
    let pool = args.db.connect(&file).await?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;
    let report = seed::run(&pool).await.context("Failed to seed reference data")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Seeded reference data ({} new rows)", report.total());
    for (table, count) in [
        ("roles", report.roles),
        ("tipos_documento", report.tipos_documento),
        ("estados_estudiante", report.estados_estudiante),
        ("programas_formacion", report.programas_formacion),
        ("fichas", report.fichas),
        ("generos", report.generos),
    ] {
        println!("  {table:<22} +{count}");
    }

    Ok(())
}
