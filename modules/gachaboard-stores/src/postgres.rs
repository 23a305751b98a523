//! Postgres-backed store implementations.
//!
//! All queries are plain runtime-bound `query_as` — no compile-time schema
//! coupling to databases this repo does not own.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use gachaboard_common::{DirectoryUser, EventWindow, GameEvent, ProgressionRecord};

use crate::traits::{EventSource, ProgressionStore, ProviderLedger, UserDirectory};

// ---------------------------------------------------------------------------
// Event log
// ---------------------------------------------------------------------------

/// Read side of the append-only game event log.
#[derive(Clone)]
pub struct PgEventLog {
    pool: PgPool,
}

impl PgEventLog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventSource for PgEventLog {
    async fn fetch_events(&self, window: &EventWindow, names: &[String]) -> Result<Vec<GameEvent>> {
        // The end-bound comparator is the only thing that changes between
        // half-open and inclusive windows.
        let sql = if window.end_inclusive {
            r#"
            SELECT id, user_id, name, created_at, payload
            FROM events
            WHERE created_at >= $1 AND created_at <= $2 AND name = ANY($3)
            ORDER BY id ASC
            "#
        } else {
            r#"
            SELECT id, user_id, name, created_at, payload
            FROM events
            WHERE created_at >= $1 AND created_at < $2 AND name = ANY($3)
            ORDER BY id ASC
            "#
        };

        let rows = sqlx::query_as::<_, GameEventRow>(sql)
            .bind(window.start)
            .bind(window.end)
            .bind(names)
            .fetch_all(&self.pool)
            .await?;

        debug!(rows = rows.len(), "fetched event window");
        Ok(rows.into_iter().map(|r| r.0).collect())
    }
}

struct GameEventRow(GameEvent);

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for GameEventRow {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> std::result::Result<Self, sqlx::Error> {
        use sqlx::Row;
        Ok(GameEventRow(GameEvent {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            name: row.try_get("name")?,
            created_at: row.try_get("created_at")?,
            payload: row.try_get("payload")?,
        }))
    }
}

// ---------------------------------------------------------------------------
// User directory
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct PgDirectory {
    pool: PgPool,
}

impl PgDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgDirectory {
    async fn lookup_user(&self, user_id: &str) -> Result<Option<DirectoryUser>> {
        let row = sqlx::query_as::<_, DirectoryUserRow>(
            r#"
            SELECT id, username, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.0))
    }
}

struct DirectoryUserRow(DirectoryUser);

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for DirectoryUserRow {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> std::result::Result<Self, sqlx::Error> {
        use sqlx::Row;
        Ok(DirectoryUserRow(DirectoryUser {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            created_at: row.try_get("created_at")?,
        }))
    }
}

// ---------------------------------------------------------------------------
// Provider ledgers
// ---------------------------------------------------------------------------

/// Membership check against one payment-provider ledger table.
///
/// Providers differ only by table, so adding one is a constructor call in
/// wiring code, not a new type.
#[derive(Clone)]
pub struct PgProviderLedger {
    pool: PgPool,
    name: String,
    table: String,
}

impl PgProviderLedger {
    pub fn new(pool: PgPool, name: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            pool,
            name: name.into(),
            table: table.into(),
        }
    }
}

#[async_trait]
impl ProviderLedger for PgProviderLedger {
    fn name(&self) -> &str {
        &self.name
    }

    async fn exists(&self, user_id: &str) -> Result<bool> {
        // Table names come from wiring code, never from user input.
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE user_id = $1)",
            self.table
        );
        let row = sqlx::query_as::<_, (bool,)>(&sql)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.0)
    }
}

// ---------------------------------------------------------------------------
// Progression store
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct PgProgression {
    pool: PgPool,
}

impl PgProgression {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProgressionStore for PgProgression {
    async fn tiers_for(&self, user_id: &str) -> Result<Vec<ProgressionRecord>> {
        let rows = sqlx::query_as::<_, ProgressionRow>(
            r#"
            SELECT user_id, tier_code
            FROM progression
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.0).collect())
    }
}

struct ProgressionRow(ProgressionRecord);

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for ProgressionRow {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> std::result::Result<Self, sqlx::Error> {
        use sqlx::Row;
        Ok(ProgressionRow(ProgressionRecord {
            user_id: row.try_get("user_id")?,
            tier_code: row.try_get("tier_code")?,
        }))
    }
}
