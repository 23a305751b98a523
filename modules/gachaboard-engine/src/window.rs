//! Windowed event selection.

use gachaboard_common::{EventWindow, GameEvent};

/// Pure filter: keep events inside the window whose action kind is
/// allowlisted. An inverted window selects nothing — the pipeline entry
/// point separately rejects it as a caller error, but this primitive stays
/// total.
pub fn filter_events(
    events: Vec<GameEvent>,
    window: &EventWindow,
    names: &[String],
) -> Vec<GameEvent> {
    events
        .into_iter()
        .filter(|e| window.contains(e.created_at) && names.iter().any(|n| n == &e.name))
        .collect()
}
