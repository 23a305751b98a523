//! The snapshot run: one closed window, start to emitted rows.
//!
//! Stage order matters and is fixed: window selection → aggregation →
//! scoring → eligibility gate → identity resolution → ranking. Caller
//! errors abort before the event fetch; data-quality problems inside the
//! window degrade individual fields and never abort. Either a full window's
//! rows come back, or none do.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::try_join_all;
use tracing::info;

use gachaboard_common::{
    GachaboardError, GameEvent, LeaderboardRow, SnapshotConfig,
};
use gachaboard_stores::{EventSource, ProgressionStore, ProviderLedger, UserDirectory};

use crate::aggregate::aggregate_partitioned;
use crate::eligibility::is_eligible;
use crate::identity::{resolve_display_name, Resolution};
use crate::rank::{order_by_request, rank};
use crate::score::apply_scores;
use crate::window::filter_events;

/// Shard count for the partitioned aggregation pass.
const AGGREGATION_SHARDS: usize = 4;

/// The external read-only collaborators for one run.
#[derive(Clone)]
pub struct SnapshotDeps {
    pub events: Arc<dyn EventSource>,
    pub directory: Arc<dyn UserDirectory>,
    pub ledgers: Vec<Arc<dyn ProviderLedger>>,
    pub progression: Arc<dyn ProgressionStore>,
}

/// Run one snapshot and emit the ordered leaderboard rows.
pub async fn run_snapshot(
    config: &SnapshotConfig,
    deps: &SnapshotDeps,
) -> Result<Vec<LeaderboardRow>, GachaboardError> {
    config.validate()?;

    let fetched = deps
        .events
        .fetch_events(&config.window, &config.event_names)
        .await
        .map_err(|e| GachaboardError::EventStore(e.to_string()))?;
    let fetched_count = fetched.len();

    // The store may over-fetch; window semantics are enforced here either way.
    let mut events = filter_events(fetched, &config.window, &config.event_names);

    if let Some(ids) = &config.user_ids {
        let allowed: HashSet<&str> = ids.iter().map(String::as_str).collect();
        events.retain(|e: &GameEvent| allowed.contains(e.user_id.as_str()));
    }

    info!(
        fetched = fetched_count,
        selected = events.len(),
        "window selected"
    );

    let mut totals = aggregate_partitioned(
        &events,
        &config.spend,
        &config.gold,
        &config.special,
        AGGREGATION_SHARDS,
    );
    apply_scores(&mut totals);

    // Sorted ids give the stores a deterministic call order and the output
    // a deterministic construction order.
    let mut user_ids: Vec<String> = totals.keys().cloned().collect();
    user_ids.sort();
    let aggregated_count = user_ids.len();

    if let Some(gate) = &config.eligibility {
        let mut eligible = Vec::with_capacity(user_ids.len());
        for user_id in user_ids {
            let ok = is_eligible(
                &user_id,
                &deps.ledgers,
                &config.synthetic,
                gate.min_progression_tier,
                deps.progression.as_ref(),
            )
            .await
            .map_err(|e| GachaboardError::Ledger(e.to_string()))?;
            if ok {
                eligible.push(user_id);
            }
        }
        user_ids = eligible;
    }

    // Directory lookups are independent per user: issue them as one batch.
    // try_join_all preserves input order, so rows are still built in the
    // deterministic sorted-id order.
    let directory_rows = try_join_all(user_ids.iter().map(|id| deps.directory.lookup_user(id)))
        .await
        .map_err(|e| GachaboardError::Directory(e.to_string()))?;

    let mut rows = Vec::with_capacity(user_ids.len());
    for (user_id, directory_row) in user_ids.iter().zip(directory_rows) {
        match resolve_display_name(
            user_id,
            directory_row.as_ref(),
            &config.identity,
            &config.synthetic,
        ) {
            Resolution::Display(name) => rows.push(LeaderboardRow::from_metrics(
                &totals[user_id],
                name,
            )),
            Resolution::Excluded => {}
        }
    }

    let rows = if config.preserve_request_order {
        // validate() guarantees the id list exists when the flag is set.
        let requested = config.user_ids.as_deref().unwrap_or(&[]);
        order_by_request(rows, requested, config.limit)
    } else {
        rank(rows, config.limit)
    };

    info!(
        aggregated = aggregated_count,
        emitted = rows.len(),
        "snapshot complete"
    );

    Ok(rows)
}
