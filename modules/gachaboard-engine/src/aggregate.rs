//! Per-user reduction of a filtered event window.
//!
//! Every metric is an associative, commutative sum or count, so the window
//! can be aggregated in one pass, or hash-partitioned by user id into
//! shards that are aggregated independently and merged — both produce the
//! same totals. `aggregate_partitioned` is the shard-and-merge form.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use gachaboard_common::{AggregatedMetrics, GameEvent, SpendSpec, ValueMetricSpec};

use crate::extract::{extract_numeric, item_elements, rarity_tag};

/// Rarity tiers that feed the three counters.
const TIER_RARE: i64 = 0;
const TIER_EPIC: i64 = 1;
const TIER_LEGENDARY: i64 = 2;

/// Reduce events into per-user metric totals. Scores are derived later,
/// after any shard merge, from the merged totals.
pub fn aggregate(
    events: &[GameEvent],
    spend: &SpendSpec,
    gold: &ValueMetricSpec,
    special: &ValueMetricSpec,
) -> HashMap<String, AggregatedMetrics> {
    let mut totals: HashMap<String, AggregatedMetrics> = HashMap::new();

    for event in events {
        let entry = totals
            .entry(event.user_id.clone())
            .or_insert_with(|| AggregatedMetrics::zero(event.user_id.clone()));

        if spend.actions.iter().any(|a| a == &event.name) {
            for item in item_elements(&event.payload, &spend.items_path) {
                match rarity_tag(item, &spend.rarity_field) {
                    Some(TIER_RARE) => entry.rare_count += 1,
                    Some(TIER_EPIC) => entry.epic_count += 1,
                    Some(TIER_LEGENDARY) => entry.legendary_count += 1,
                    // Unknown tiers and non-digit markers alike stay out of
                    // the counters.
                    Some(_) | None => {}
                }
            }
        }

        // Currency totals saturate rather than wrap, matching the score
        // arithmetic.
        if gold.actions.iter().any(|a| a == &event.name) {
            entry.gold_total = entry
                .gold_total
                .saturating_add(extract_numeric(&event.payload, &gold.paths, gold.mode));
        }

        if special.actions.iter().any(|a| a == &event.name) {
            entry.special_total = entry
                .special_total
                .saturating_add(extract_numeric(&event.payload, &special.paths, special.mode));
        }
    }

    totals
}

/// Merge partial per-shard maps into one. Shards are disjoint by
/// construction, but the merge tolerates overlap (it folds).
pub fn merge_partials(
    partials: Vec<HashMap<String, AggregatedMetrics>>,
) -> HashMap<String, AggregatedMetrics> {
    let mut merged: HashMap<String, AggregatedMetrics> = HashMap::new();
    for partial in partials {
        for (user_id, metrics) in partial {
            match merged.get_mut(&user_id) {
                Some(existing) => existing.merge(&metrics),
                None => {
                    merged.insert(user_id, metrics);
                }
            }
        }
    }
    merged
}

/// Shard-and-merge aggregation: partition by user-id hash, aggregate each
/// shard independently, merge. Totals are identical to the one-pass form
/// regardless of shard count or merge order.
pub fn aggregate_partitioned(
    events: &[GameEvent],
    spend: &SpendSpec,
    gold: &ValueMetricSpec,
    special: &ValueMetricSpec,
    shards: usize,
) -> HashMap<String, AggregatedMetrics> {
    let shards = shards.max(1);
    let mut buckets: Vec<Vec<GameEvent>> = vec![Vec::new(); shards];
    for event in events {
        let mut hasher = DefaultHasher::new();
        event.user_id.hash(&mut hasher);
        let idx = (hasher.finish() as usize) % shards;
        buckets[idx].push(event.clone());
    }

    let partials = buckets
        .iter()
        .map(|bucket| aggregate(bucket, spend, gold, special))
        .collect();

    merge_partials(partials)
}
