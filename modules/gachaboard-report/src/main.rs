//! The snapshot report runner: load config, run one snapshot against
//! Postgres-backed stores, save the leaderboard as CSV.

use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gachaboard_common::SnapshotConfig;
use gachaboard_engine::{run_snapshot, SnapshotDeps};
use gachaboard_stores::{
    PgDirectory, PgEventLog, PgProgression, PgProviderLedger, ProviderLedger,
};

mod config;
mod report;

use config::ReportEnv;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("gachaboard=info".parse()?))
        .init();

    let env = ReportEnv::from_env();

    let raw = fs::read_to_string(&env.config_path)
        .with_context(|| format!("reading snapshot config {}", env.config_path))?;
    let snapshot: SnapshotConfig = serde_json::from_str(&raw)
        .with_context(|| format!("parsing snapshot config {}", env.config_path))?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&env.database_url)
        .await
        .context("connecting to Postgres")?;

    let ledgers: Vec<Arc<dyn ProviderLedger>> = env
        .provider_tables
        .iter()
        .map(|(name, table)| {
            Arc::new(PgProviderLedger::new(pool.clone(), name.clone(), table.clone()))
                as Arc<dyn ProviderLedger>
        })
        .collect();

    let deps = SnapshotDeps {
        events: Arc::new(PgEventLog::new(pool.clone())),
        directory: Arc::new(PgDirectory::new(pool.clone())),
        ledgers,
        progression: Arc::new(PgProgression::new(pool)),
    };

    let rows = run_snapshot(&snapshot, &deps).await?;

    let file = fs::File::create(&env.output_csv)
        .with_context(|| format!("creating {}", env.output_csv))?;
    report::write_csv(&rows, file)?;
    info!(
        rows = rows.len(),
        path = env.output_csv.as_str(),
        "Saved CSV report"
    );

    Ok(())
}
