//! Composite score derivation.
//!
//! `score = special_total * (1 + legendary_count * 0.10)`, carried as a
//! scaled integer in tenths so large totals stay exact and rankings are
//! reproducible across platforms.

use std::collections::HashMap;

use gachaboard_common::AggregatedMetrics;

pub fn score_tenths(special_total: i64, legendary_count: u64) -> i64 {
    special_total.saturating_mul(10 + legendary_count as i64)
}

/// Derive scores for every aggregated user. Runs after the final shard
/// merge so each score reflects the user's complete totals.
pub fn apply_scores(totals: &mut HashMap<String, AggregatedMetrics>) {
    for metrics in totals.values_mut() {
        metrics.score_tenths = score_tenths(metrics.special_total, metrics.legendary_count);
    }
}
