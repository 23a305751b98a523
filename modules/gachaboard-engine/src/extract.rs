//! Tolerant extraction of values from semi-structured event payloads.
//!
//! Payload shapes are not contractually guaranteed by the event producers,
//! so nothing in here errors: a path that fails to resolve, or resolves to
//! something that isn't numeric, is simply treated as absent.

use gachaboard_common::PathMode;
use serde_json::Value;

const EMPTY_ITEMS: &[Value] = &[];

/// Walk a dot-separated field path through nested objects.
pub fn value_at<'a>(payload: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = payload;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Resolve a path to an integer amount.
///
/// Accepts JSON integers, whole-valued floats, and numeric strings. Null,
/// absence, and anything unparseable all read as `None` — the caller
/// continues to the next candidate or contributes 0.
pub fn numeric_at(payload: &Value, path: &str) -> Option<i64> {
    let value = value_at(payload, path)?;
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    if let Some(f) = value.as_f64() {
        if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
            return Some(f as i64);
        }
        return None;
    }
    value.as_str()?.trim().parse::<i64>().ok()
}

/// Apply a candidate path list to a payload.
///
/// `FirstMatch`: the first candidate that resolves wins. `SumAll`: every
/// resolving candidate contributes. Either way, no candidate resolving
/// means 0 — never null, never an error.
pub fn extract_numeric(payload: &Value, paths: &[String], mode: PathMode) -> i64 {
    match mode {
        PathMode::FirstMatch => paths
            .iter()
            .find_map(|p| numeric_at(payload, p))
            .unwrap_or(0),
        PathMode::SumAll => paths
            .iter()
            .filter_map(|p| numeric_at(payload, p))
            .fold(0i64, i64::saturating_add),
    }
}

/// The item-drop array of a payload. Absent or non-array degrades to empty.
pub fn item_elements<'a>(payload: &'a Value, items_path: &str) -> &'a [Value] {
    value_at(payload, items_path)
        .and_then(|v| v.as_array())
        .map(|a| a.as_slice())
        .unwrap_or(EMPTY_ITEMS)
}

/// The rarity tag of one item element.
///
/// Only an all-digits string or a non-negative JSON integer counts. An item
/// carrying anything else is excluded from rarity counting entirely — it is
/// not coerced to tier 0.
pub fn rarity_tag(item: &Value, rarity_field: &str) -> Option<i64> {
    let value = item.as_object()?.get(rarity_field)?;
    if let Some(n) = value.as_u64() {
        return i64::try_from(n).ok();
    }
    let s = value.as_str()?;
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paths(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    // --- value_at / numeric_at ---

    #[test]
    fn walks_nested_paths() {
        let p = json!({"reward": {"gold": 100}});
        assert_eq!(numeric_at(&p, "reward.gold"), Some(100));
    }

    #[test]
    fn absent_and_null_read_as_none() {
        let p = json!({"reward": {"gold": null}});
        assert_eq!(numeric_at(&p, "reward.gold"), None);
        assert_eq!(numeric_at(&p, "reward.silver"), None);
        assert_eq!(numeric_at(&p, "bonus.gold"), None);
    }

    #[test]
    fn numeric_strings_parse() {
        let p = json!({"amount": " 250 "});
        assert_eq!(numeric_at(&p, "amount"), Some(250));
    }

    #[test]
    fn garbage_strings_read_as_none() {
        let p = json!({"amount": "lots"});
        assert_eq!(numeric_at(&p, "amount"), None);
    }

    #[test]
    fn whole_floats_parse_fractional_do_not() {
        let p = json!({"a": 100.0, "b": 100.5});
        assert_eq!(numeric_at(&p, "a"), Some(100));
        assert_eq!(numeric_at(&p, "b"), None);
    }

    #[test]
    fn path_through_non_object_reads_as_none() {
        let p = json!({"reward": [1, 2, 3]});
        assert_eq!(numeric_at(&p, "reward.gold"), None);
    }

    // --- extract_numeric ---

    #[test]
    fn first_match_takes_first_resolving_candidate() {
        let p = json!({"reward": {"gold": "abc"}, "rewards": {"gold": 50}});
        let got = extract_numeric(&p, &paths(&["reward.gold", "rewards.gold"]), PathMode::FirstMatch);
        assert_eq!(got, 50);
    }

    #[test]
    fn first_match_stops_at_first_hit() {
        let p = json!({"reward": {"gold": 100}, "rewards": {"gold": 50}});
        let got = extract_numeric(&p, &paths(&["reward.gold", "rewards.gold"]), PathMode::FirstMatch);
        assert_eq!(got, 100);
    }

    #[test]
    fn sum_all_adds_every_resolving_candidate() {
        let p = json!({"reward": {"gold": 100}, "rewards": {"gold": 50}});
        let got = extract_numeric(&p, &paths(&["reward.gold", "rewards.gold"]), PathMode::SumAll);
        assert_eq!(got, 150);
    }

    #[test]
    fn sum_all_saturates_at_the_integer_ceiling() {
        let p = json!({"a": i64::MAX, "b": i64::MAX});
        let got = extract_numeric(&p, &paths(&["a", "b"]), PathMode::SumAll);
        assert_eq!(got, i64::MAX);
    }

    #[test]
    fn nothing_resolving_yields_zero() {
        let p = json!({"other": 1});
        for mode in [PathMode::FirstMatch, PathMode::SumAll] {
            assert_eq!(extract_numeric(&p, &paths(&["reward.gold", "rewards.gold"]), mode), 0);
        }
    }

    // --- item_elements ---

    #[test]
    fn missing_or_wrong_shaped_array_degrades_to_empty() {
        assert!(item_elements(&json!({}), "items").is_empty());
        assert!(item_elements(&json!({"items": "three"}), "items").is_empty());
        assert!(item_elements(&json!({"items": {"a": 1}}), "items").is_empty());
    }

    #[test]
    fn array_elements_come_back_in_order() {
        let p = json!({"items": [{"rarity": "0"}, {"rarity": "2"}]});
        let items = item_elements(&p, "items");
        assert_eq!(items.len(), 2);
        assert_eq!(rarity_tag(&items[1], "rarity"), Some(2));
    }

    // --- rarity_tag ---

    #[test]
    fn digit_strings_and_integers_parse() {
        assert_eq!(rarity_tag(&json!({"rarity": "0"}), "rarity"), Some(0));
        assert_eq!(rarity_tag(&json!({"rarity": "12"}), "rarity"), Some(12));
        assert_eq!(rarity_tag(&json!({"rarity": 2}), "rarity"), Some(2));
    }

    #[test]
    fn non_digit_markers_are_excluded() {
        assert_eq!(rarity_tag(&json!({"rarity": "abc"}), "rarity"), None);
        assert_eq!(rarity_tag(&json!({"rarity": ""}), "rarity"), None);
        assert_eq!(rarity_tag(&json!({"rarity": "-1"}), "rarity"), None);
        assert_eq!(rarity_tag(&json!({"rarity": "1.5"}), "rarity"), None);
        assert_eq!(rarity_tag(&json!({"rarity": -1}), "rarity"), None);
        assert_eq!(rarity_tag(&json!({"rarity": null}), "rarity"), None);
        assert_eq!(rarity_tag(&json!({}), "rarity"), None);
        assert_eq!(rarity_tag(&json!("bare"), "rarity"), None);
    }
}
