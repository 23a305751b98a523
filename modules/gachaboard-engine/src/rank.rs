//! Final ordering and truncation.

use std::cmp::Ordering;
use std::collections::HashMap;

use gachaboard_common::LeaderboardRow;

/// Sort descending by score, breaking ties descending by special-currency
/// total, then descending by legendary count, then ascending by user id so
/// equal runs emit byte-identical output.
pub fn rank(mut rows: Vec<LeaderboardRow>, limit: Option<usize>) -> Vec<LeaderboardRow> {
    rows.sort_by(compare);
    if let Some(limit) = limit {
        rows.truncate(limit);
    }
    rows
}

fn compare(a: &LeaderboardRow, b: &LeaderboardRow) -> Ordering {
    b.score_tenths
        .cmp(&a.score_tenths)
        .then_with(|| b.special_total.cmp(&a.special_total))
        .then_with(|| b.legendary_count.cmp(&a.legendary_count))
        .then_with(|| a.user_id.cmp(&b.user_id))
}

/// Emit rows in the caller-requested id order instead of rank order.
/// Ids with no surviving row are skipped.
pub fn order_by_request(
    rows: Vec<LeaderboardRow>,
    requested_ids: &[String],
    limit: Option<usize>,
) -> Vec<LeaderboardRow> {
    let mut by_id: HashMap<String, LeaderboardRow> = rows
        .into_iter()
        .map(|r| (r.user_id.clone(), r))
        .collect();
    let mut ordered: Vec<LeaderboardRow> = requested_ids
        .iter()
        .filter_map(|id| by_id.remove(id))
        .collect();
    if let Some(limit) = limit {
        ordered.truncate(limit);
    }
    ordered
}
