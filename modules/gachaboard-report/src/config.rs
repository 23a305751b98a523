//! Runtime environment for the report binary.

use std::env;

/// Everything the binary needs before it opens a connection. Loaded from
/// environment variables; missing required variables fail fast with a
/// clear message.
#[derive(Debug, Clone)]
pub struct ReportEnv {
    pub database_url: String,
    /// Path to the snapshot configuration JSON file.
    pub config_path: String,
    pub output_csv: String,
    /// Provider ledgers to OR together, as `(name, table)` pairs.
    pub provider_tables: Vec<(String, String)>,
}

impl ReportEnv {
    pub fn from_env() -> Self {
        Self {
            database_url: required_env("DATABASE_URL"),
            config_path: required_env("SNAPSHOT_CONFIG"),
            output_csv: env::var("OUTPUT_CSV").unwrap_or_else(|_| "leaderboard.csv".to_string()),
            provider_tables: parse_provider_tables(
                &env::var("PROVIDER_LEDGERS").unwrap_or_default(),
            ),
        }
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}

/// Parse `PROVIDER_LEDGERS`: comma-separated `name=table` pairs, e.g.
/// `provider_a=payments_a,provider_b=payments_b`. Empty input means no
/// ledger-backed membership checks. A malformed pair is a deployment
/// mistake and fails fast.
pub fn parse_provider_tables(raw: &str) -> Vec<(String, String)> {
    raw.split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (name, table) = pair
                .split_once('=')
                .unwrap_or_else(|| panic!("PROVIDER_LEDGERS entry {pair:?} is not name=table"));
            (name.trim().to_string(), table.trim().to_string())
        })
        .collect()
}
