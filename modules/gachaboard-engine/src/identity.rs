//! Display-name resolution against the user directory.

use gachaboard_common::{CutoffMode, DirectoryUser, IdentityPolicy, SyntheticAccounts};

/// Outcome of resolving one user for emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Display(String),
    Excluded,
}

/// Resolve a user's display name through the fallback chain:
///
/// 1. synthetic account and the policy excludes them → dropped;
/// 2. no directory row → the raw id;
/// 3. row newer than the signup cutoff → dropped or id-fallback, per
///    `cutoff_mode` (the two historical report variants disagreed here, so
///    the choice is explicit);
/// 4. null, empty, or sentinel username → the raw id;
/// 5. anything else → the username as stored.
pub fn resolve_display_name(
    user_id: &str,
    row: Option<&DirectoryUser>,
    policy: &IdentityPolicy,
    synthetic: &SyntheticAccounts,
) -> Resolution {
    if policy.exclude_synthetic && synthetic.is_synthetic(user_id) {
        return Resolution::Excluded;
    }

    let user = match row {
        None => return Resolution::Display(user_id.to_string()),
        Some(u) => u,
    };

    if let Some(cutoff) = policy.signup_cutoff {
        if user.created_at > cutoff {
            return match policy.cutoff_mode {
                CutoffMode::ExcludeRow => Resolution::Excluded,
                CutoffMode::FallbackOnMismatch => Resolution::Display(user_id.to_string()),
            };
        }
    }

    match user.username.as_deref() {
        None | Some("") => Resolution::Display(user_id.to_string()),
        Some(name) if name == policy.sentinel_username => Resolution::Display(user_id.to_string()),
        Some(name) => Resolution::Display(name.to_string()),
    }
}
