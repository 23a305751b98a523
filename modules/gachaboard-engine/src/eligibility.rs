//! Reward-tier eligibility gating.
//!
//! A user qualifies when (a) any configured provider ledger knows them —
//! synthetic accounts pass automatically — and (b) at least one progression
//! record clears the minimum tier. The membership check runs first; tier
//! lookups only happen for members.

use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use gachaboard_common::SyntheticAccounts;
use gachaboard_stores::{ProgressionStore, ProviderLedger};

/// Parse the numeric tier from a code's trailing-digit suffix.
/// `"constellation12"` → 12. No trailing digits, or digits that overflow,
/// means the code never clears any threshold — not an error.
pub fn trailing_tier(code: &str) -> Option<i64> {
    let bytes = code.as_bytes();
    let start = bytes
        .iter()
        .rposition(|b| !b.is_ascii_digit())
        .map(|i| i + 1)
        .unwrap_or(0);
    let suffix = &code[start..];
    if suffix.is_empty() {
        return None;
    }
    suffix.parse::<i64>().ok()
}

/// OR across provider ledgers, with the synthetic-account automatic pass.
pub async fn has_membership(
    user_id: &str,
    ledgers: &[Arc<dyn ProviderLedger>],
    synthetic: &SyntheticAccounts,
) -> Result<bool> {
    if synthetic.is_synthetic(user_id) {
        debug!(user_id, "membership: synthetic account auto-pass");
        return Ok(true);
    }
    for ledger in ledgers {
        if ledger.exists(user_id).await? {
            debug!(user_id, provider = ledger.name(), "membership: ledger hit");
            return Ok(true);
        }
    }
    Ok(false)
}

/// The full eligibility gate for one user.
pub async fn is_eligible(
    user_id: &str,
    ledgers: &[Arc<dyn ProviderLedger>],
    synthetic: &SyntheticAccounts,
    min_progression_tier: i64,
    progression: &dyn ProgressionStore,
) -> Result<bool> {
    if !has_membership(user_id, ledgers, synthetic).await? {
        return Ok(false);
    }

    let records = progression.tiers_for(user_id).await?;
    Ok(records
        .iter()
        .filter_map(|r| trailing_tier(&r.tier_code))
        .any(|tier| tier >= min_progression_tier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gachaboard_common::ProgressionRecord;
    use gachaboard_stores::{MemoryLedger, MemoryProgression};

    // --- trailing_tier ---

    #[test]
    fn trailing_digits_parse_as_the_tier() {
        assert_eq!(trailing_tier("constellation12"), Some(12));
        assert_eq!(trailing_tier("challenge_8"), Some(8));
        assert_eq!(trailing_tier("10"), Some(10));
        assert_eq!(trailing_tier("tier0"), Some(0));
    }

    #[test]
    fn codes_without_trailing_digits_never_clear_a_threshold() {
        assert_eq!(trailing_tier("constellation"), None);
        assert_eq!(trailing_tier(""), None);
        assert_eq!(trailing_tier("12abc"), None);
    }

    #[test]
    fn only_the_trailing_run_counts() {
        // Digits in the middle belong to the name, not the tier.
        assert_eq!(trailing_tier("season2_boss7"), Some(7));
    }

    // --- gate ---

    fn ledgers(sets: &[(&str, &[&str])]) -> Vec<Arc<dyn ProviderLedger>> {
        sets.iter()
            .map(|(name, members)| {
                Arc::new(MemoryLedger::new(
                    *name,
                    members.iter().map(|m| m.to_string()),
                )) as Arc<dyn ProviderLedger>
            })
            .collect()
    }

    fn progression(records: &[(&str, &str)]) -> MemoryProgression {
        MemoryProgression::new(
            records
                .iter()
                .map(|(u, code)| ProgressionRecord {
                    user_id: u.to_string(),
                    tier_code: code.to_string(),
                })
                .collect(),
        )
    }

    #[tokio::test]
    async fn member_above_threshold_is_eligible() {
        let l = ledgers(&[("provider_a", &["u1"])]);
        let p = progression(&[("u1", "constellation12")]);
        let syn = SyntheticAccounts::default();
        assert!(is_eligible("u1", &l, &syn, 10, &p).await.unwrap());
    }

    #[tokio::test]
    async fn tier_below_threshold_excludes_even_members() {
        let l = ledgers(&[("provider_a", &["u1"])]);
        let p = progression(&[("u1", "constellation8")]);
        let syn = SyntheticAccounts::default();
        assert!(!is_eligible("u1", &l, &syn, 10, &p).await.unwrap());
    }

    #[tokio::test]
    async fn no_membership_excludes_before_tier_is_consulted() {
        let l = ledgers(&[("provider_a", &[])]);
        let p = progression(&[("u1", "constellation12")]);
        let syn = SyntheticAccounts::default();
        assert!(!is_eligible("u1", &l, &syn, 10, &p).await.unwrap());
    }

    #[tokio::test]
    async fn membership_is_an_or_across_providers() {
        let l = ledgers(&[
            ("provider_a", &[]),
            ("provider_b", &[]),
            ("provider_c", &["u1"]),
        ]);
        let p = progression(&[("u1", "constellation10")]);
        let syn = SyntheticAccounts::default();
        assert!(is_eligible("u1", &l, &syn, 10, &p).await.unwrap());
    }

    #[tokio::test]
    async fn synthetic_accounts_pass_membership_automatically() {
        let l = ledgers(&[("provider_a", &[])]);
        let p = progression(&[("qa_1", "constellation10")]);
        let syn = SyntheticAccounts::new(vec!["qa_".into()]);
        assert!(is_eligible("qa_1", &l, &syn, 10, &p).await.unwrap());
    }

    #[tokio::test]
    async fn unparseable_tier_codes_fail_the_threshold() {
        let l = ledgers(&[("provider_a", &["u1"])]);
        let p = progression(&[("u1", "constellation"), ("u1", "legacy_code")]);
        let syn = SyntheticAccounts::default();
        assert!(!is_eligible("u1", &l, &syn, 1, &p).await.unwrap());
    }

    #[tokio::test]
    async fn any_single_qualifying_record_suffices() {
        let l = ledgers(&[("provider_a", &["u1"])]);
        let p = progression(&[("u1", "constellation3"), ("u1", "constellation11")]);
        let syn = SyntheticAccounts::default();
        assert!(is_eligible("u1", &l, &syn, 10, &p).await.unwrap());
    }
}
