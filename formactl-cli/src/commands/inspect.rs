//! Print the reference snapshot straight from the store (no cache)

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use formactl_server::{fetch_snapshot, PgReferenceStore, ReferenceSnapshot};

use super::DatabaseArgs;
use crate::config::FormactlConfig;

/// Arguments for the inspect command
#[derive(Parser, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub db: DatabaseArgs,

    /// Print the full payload as JSON instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Per-read timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,
}

pub async fn run_inspect(args: InspectArgs) -> Result<()> {
    let file = FormactlConfig::load()?;
    let store = PgReferenceStore::new(args.db.connect(&file).await?);

    let snapshot = fetch_snapshot(&store, Duration::from_secs(args.timeout_secs))
        .await
        .context("Failed to read reference data")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", render_summary(&snapshot));
    }

    Ok(())
}

fn render_summary(snapshot: &ReferenceSnapshot) -> String {
    let mut out = String::new();
    for (key, count) in snapshot.counts() {
        out.push_str(&format!("{key:<20} {count:>5}\n"));
    }

    if !snapshot.fichas.is_empty() {
        out.push_str("\nfichas:\n");
        for cohort in &snapshot.fichas {
            out.push_str(&format!(
                "  {:<10} {}\n",
                cohort.numero_ficha, cohort.programa.nombre
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use formactl_server::models::{Cohort, ProgramRef};

    #[test]
    fn summary_lists_counts_and_cohorts() {
        let snapshot = ReferenceSnapshot {
            fichas: vec![Cohort {
                id: 1,
                numero_ficha: "2758374".into(),
                programa: ProgramRef {
                    id: 2,
                    nombre: "Análisis y Desarrollo de Software".into(),
                },
            }],
            ..Default::default()
        };

        let out = render_summary(&snapshot);
        assert!(out.starts_with("roles"));
        assert!(out.contains("fichas                   1"));
        assert!(out.contains("2758374    Análisis y Desarrollo de Software"));
    }

    #[test]
    fn empty_snapshot_has_no_cohort_section() {
        let out = render_summary(&ReferenceSnapshot::default());
        assert_eq!(out.lines().count(), 6);
    }
}
