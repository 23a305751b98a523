//! Shared domain types. Events and users are owned by external systems;
//! everything derived here is rebuilt from scratch on every snapshot run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One record from the append-only game event log.
///
/// `payload` is whatever the event producer wrote for this action kind —
/// shapes vary by `name` and carry no contract. Fields may be absent, null,
/// or mistyped; consumers must degrade, not fail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEvent {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub payload: serde_json::Value,
}

impl GameEvent {
    pub fn new(
        id: i64,
        user_id: impl Into<String>,
        name: impl Into<String>,
        created_at: DateTime<Utc>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            id,
            user_id: user_id.into(),
            name: name.into(),
            created_at,
            payload,
        }
    }
}

/// A row from the external user directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryUser {
    pub id: String,
    /// May be null, empty, or the reserved sentinel — all meaning
    /// "no real display name set".
    pub username: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A progression record. `tier_code` encodes a numeric tier as a
/// trailing-digit suffix, e.g. `"constellation12"` → tier 12.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionRecord {
    pub user_id: String,
    pub tier_code: String,
}

/// Per-user metric totals for one snapshot window.
///
/// A pure function of the events inside the window. Per-metric sums and
/// counts are associative and commutative, so shards aggregated
/// independently and merged in any order produce identical totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedMetrics {
    pub user_id: String,
    pub rare_count: u64,
    pub epic_count: u64,
    pub legendary_count: u64,
    pub gold_total: i64,
    pub special_total: i64,
    /// Composite score in tenths: `special_total * (10 + legendary_count)`.
    /// Scaled-integer arithmetic keeps large totals exact and rankings
    /// reproducible across platforms.
    pub score_tenths: i64,
}

impl AggregatedMetrics {
    pub fn zero(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            rare_count: 0,
            epic_count: 0,
            legendary_count: 0,
            gold_total: 0,
            special_total: 0,
            score_tenths: 0,
        }
    }

    /// Fold another partial into this one. Scores are not merged — they are
    /// derived after the final merge, from the merged totals.
    pub fn merge(&mut self, other: &AggregatedMetrics) {
        debug_assert_eq!(self.user_id, other.user_id);
        self.rare_count += other.rare_count;
        self.epic_count += other.epic_count;
        self.legendary_count += other.legendary_count;
        // Same saturating policy as per-event accumulation and scoring.
        self.gold_total = self.gold_total.saturating_add(other.gold_total);
        self.special_total = self.special_total.saturating_add(other.special_total);
    }

    /// The composite score as a decimal.
    pub fn score(&self) -> f64 {
        self.score_tenths as f64 / 10.0
    }
}

/// One emitted leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub user_id: String,
    pub display_name: String,
    pub rare_count: u64,
    pub epic_count: u64,
    pub legendary_count: u64,
    pub gold_total: i64,
    pub special_total: i64,
    pub score_tenths: i64,
    /// Decimal rendering of `score_tenths`, kept on the row so serialized
    /// output carries the score consumers expect.
    pub score: f64,
}

impl LeaderboardRow {
    pub fn from_metrics(metrics: &AggregatedMetrics, display_name: impl Into<String>) -> Self {
        Self {
            user_id: metrics.user_id.clone(),
            display_name: display_name.into(),
            rare_count: metrics.rare_count,
            epic_count: metrics.epic_count,
            legendary_count: metrics.legendary_count,
            gold_total: metrics.gold_total,
            special_total: metrics.special_total,
            score_tenths: metrics.score_tenths,
            score: metrics.score(),
        }
    }
}
