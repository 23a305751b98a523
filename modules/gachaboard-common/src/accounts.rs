//! Synthetic-account identification.
//!
//! Operations seeds synthetic accounts (QA bots, payout-test users) whose
//! ids carry a reserved prefix. Two stages care about them for opposite
//! reasons: eligibility treats them as an automatic membership pass, and
//! emission may drop them from public leaderboards. Both must agree on what
//! "synthetic" means, so the predicate lives here and is used by name.

use serde::{Deserialize, Serialize};

/// The shared synthetic-account predicate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyntheticAccounts {
    /// Id prefixes that mark an account as synthetic. Empty means the
    /// deployment has no synthetic accounts.
    pub prefixes: Vec<String>,
}

impl SyntheticAccounts {
    pub fn new(prefixes: Vec<String>) -> Self {
        Self { prefixes }
    }

    pub fn is_synthetic(&self, user_id: &str) -> bool {
        self.prefixes.iter().any(|p| user_id.starts_with(p.as_str()))
    }
}
