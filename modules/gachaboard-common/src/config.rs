//! Snapshot run configuration.
//!
//! Every semantics-bearing knob is explicit. The two places where historical
//! report scripts disagreed with each other — whether reward paths are
//! alternatives or summed, and what a signup cutoff does to the username
//! join — are enum fields here (`PathMode`, `CutoffMode`) so a run never
//! silently inherits one variant's behavior.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::accounts::SyntheticAccounts;
use crate::error::GachaboardError;

/// The snapshot time window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EventWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Half-open `[start, end)` by default; inclusive end when set.
    pub end_inclusive: bool,
}

impl EventWindow {
    pub fn half_open(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            end_inclusive: false,
        }
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        if ts < self.start {
            return false;
        }
        if self.end_inclusive {
            ts <= self.end
        } else {
            ts < self.end
        }
    }
}

/// How a metric's candidate field paths combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathMode {
    /// Walk candidates in order, take the first that resolves to a number.
    FirstMatch,
    /// Sum every candidate that resolves to a number.
    SumAll,
}

/// A summed-currency metric: which actions feed it, which payload paths
/// hold the amount, and how multiple paths combine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueMetricSpec {
    pub actions: Vec<String>,
    /// Dot-separated field paths, in candidate order.
    pub paths: Vec<String>,
    pub mode: PathMode,
}

/// Rarity counting: which actions carry item drops, where the item array
/// lives in the payload, and which element field holds the rarity tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendSpec {
    pub actions: Vec<String>,
    pub items_path: String,
    pub rarity_field: String,
}

/// What a signup cutoff does to a directory row newer than the cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutoffMode {
    /// Drop the user from the output entirely.
    ExcludeRow,
    /// Keep the row but ignore the directory username; display falls back
    /// to the raw id.
    FallbackOnMismatch,
}

/// Display-name resolution policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityPolicy {
    /// Reserved placeholder meaning "no real display name set". Matching
    /// usernames fall back to the raw id.
    pub sentinel_username: String,
    pub signup_cutoff: Option<DateTime<Utc>>,
    pub cutoff_mode: CutoffMode,
    /// Drop synthetic accounts from emitted rows.
    pub exclude_synthetic: bool,
}

/// Eligibility gate parameters. The provider ledgers themselves arrive as
/// run dependencies; the gate ORs across whichever set is supplied.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EligibilityConfig {
    pub min_progression_tier: i64,
}

/// Full configuration for one snapshot run. No implicit defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfig {
    pub window: EventWindow,
    /// Action-kind allowlist for the window fetch.
    pub event_names: Vec<String>,
    pub spend: SpendSpec,
    pub gold: ValueMetricSpec,
    pub special: ValueMetricSpec,
    /// Restrict the run to these users. When `preserve_request_order` is
    /// set, final rows come back in this order instead of rank order.
    pub user_ids: Option<Vec<String>>,
    pub preserve_request_order: bool,
    pub synthetic: SyntheticAccounts,
    pub identity: IdentityPolicy,
    pub eligibility: Option<EligibilityConfig>,
    pub limit: Option<usize>,
}

impl SnapshotConfig {
    /// Reject impossible requests before any store is touched. Caller
    /// errors are loud and immediate; data-quality problems inside the
    /// window never reach this path.
    pub fn validate(&self) -> Result<(), GachaboardError> {
        if self.window.start >= self.window.end {
            return Err(GachaboardError::Config(format!(
                "window start {} is not before end {}",
                self.window.start, self.window.end
            )));
        }
        if self.event_names.is_empty() {
            return Err(GachaboardError::Config(
                "event name allowlist is empty".into(),
            ));
        }
        for action in &self.spend.actions {
            self.require_allowlisted(action, "spend")?;
        }
        if self.spend.items_path.is_empty() {
            return Err(GachaboardError::Config("spend items_path is empty".into()));
        }
        if self.spend.rarity_field.is_empty() {
            return Err(GachaboardError::Config("spend rarity_field is empty".into()));
        }
        self.validate_metric(&self.gold, "gold")?;
        self.validate_metric(&self.special, "special")?;
        if self.preserve_request_order && self.user_ids.is_none() {
            return Err(GachaboardError::Config(
                "preserve_request_order requires a user_ids list".into(),
            ));
        }
        Ok(())
    }

    fn validate_metric(&self, spec: &ValueMetricSpec, label: &str) -> Result<(), GachaboardError> {
        if spec.actions.is_empty() {
            return Err(GachaboardError::Config(format!(
                "{label} metric has no actions"
            )));
        }
        if spec.paths.is_empty() {
            return Err(GachaboardError::Config(format!(
                "{label} metric has no candidate paths"
            )));
        }
        for action in &spec.actions {
            self.require_allowlisted(action, label)?;
        }
        Ok(())
    }

    fn require_allowlisted(&self, action: &str, label: &str) -> Result<(), GachaboardError> {
        if !self.event_names.iter().any(|n| n == action) {
            return Err(GachaboardError::Config(format!(
                "{label} references action {action:?} missing from the event name allowlist"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn base_config() -> SnapshotConfig {
        SnapshotConfig {
            window: EventWindow::half_open(ts("2026-01-01T00:00:00Z"), ts("2026-02-01T00:00:00Z")),
            event_names: vec!["spend".into(), "claim".into(), "unlock".into()],
            spend: SpendSpec {
                actions: vec!["spend".into()],
                items_path: "items".into(),
                rarity_field: "rarity".into(),
            },
            gold: ValueMetricSpec {
                actions: vec!["claim".into(), "unlock".into()],
                paths: vec!["reward.gold".into(), "rewards.gold".into()],
                mode: PathMode::SumAll,
            },
            special: ValueMetricSpec {
                actions: vec!["claim".into()],
                paths: vec!["reward.purple".into()],
                mode: PathMode::SumAll,
            },
            user_ids: None,
            preserve_request_order: false,
            synthetic: SyntheticAccounts::default(),
            identity: IdentityPolicy {
                sentinel_username: "Unknown".into(),
                signup_cutoff: None,
                cutoff_mode: CutoffMode::FallbackOnMismatch,
                exclude_synthetic: false,
            },
            eligibility: None,
            limit: None,
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn inverted_window_is_a_config_error() {
        let mut cfg = base_config();
        cfg.window = EventWindow::half_open(ts("2026-02-01T00:00:00Z"), ts("2026-01-01T00:00:00Z"));
        assert!(matches!(
            cfg.validate(),
            Err(GachaboardError::Config(_))
        ));
    }

    #[test]
    fn empty_window_is_a_config_error() {
        let mut cfg = base_config();
        cfg.window = EventWindow::half_open(ts("2026-01-01T00:00:00Z"), ts("2026-01-01T00:00:00Z"));
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn metric_action_outside_allowlist_is_rejected() {
        let mut cfg = base_config();
        cfg.gold.actions.push("trade".into());
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("trade"));
    }

    #[test]
    fn order_flag_without_id_list_is_rejected() {
        let mut cfg = base_config();
        cfg.preserve_request_order = true;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn half_open_window_excludes_end() {
        let w = EventWindow::half_open(ts("2026-01-01T00:00:00Z"), ts("2026-01-02T00:00:00Z"));
        assert!(w.contains(ts("2026-01-01T00:00:00Z")));
        assert!(w.contains(ts("2026-01-01T23:59:59Z")));
        assert!(!w.contains(ts("2026-01-02T00:00:00Z")));
    }

    #[test]
    fn inclusive_window_keeps_end() {
        let mut w = EventWindow::half_open(ts("2026-01-01T00:00:00Z"), ts("2026-01-02T00:00:00Z"));
        w.end_inclusive = true;
        assert!(w.contains(ts("2026-01-02T00:00:00Z")));
        assert!(!w.contains(ts("2026-01-02T00:00:01Z")));
    }
}
