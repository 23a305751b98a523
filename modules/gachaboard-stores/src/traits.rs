//! Abstract read contracts (see the snapshot pipeline for the consumers).
//!
//! Every lookup is single-round-trip-shaped per key so callers may batch or
//! parallelize by user id without ordering guarantees between stores.

use anyhow::Result;
use async_trait::async_trait;

use gachaboard_common::{DirectoryUser, EventWindow, GameEvent, ProgressionRecord};

/// The append-only event log, read side only.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Fetch events whose `created_at` falls in `window` and whose `name`
    /// is in `names`. Implementations may over-fetch; the engine re-filters.
    async fn fetch_events(&self, window: &EventWindow, names: &[String]) -> Result<Vec<GameEvent>>;
}

/// The external user directory.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn lookup_user(&self, user_id: &str) -> Result<Option<DirectoryUser>>;
}

/// One payment-provider ledger. Membership is an existence predicate.
#[async_trait]
pub trait ProviderLedger: Send + Sync {
    /// Provider tag for logging ("provider_a", ...).
    fn name(&self) -> &str;

    async fn exists(&self, user_id: &str) -> Result<bool>;
}

/// The progression store (challenge/constellation records).
#[async_trait]
pub trait ProgressionStore: Send + Sync {
    async fn tiers_for(&self, user_id: &str) -> Result<Vec<ProgressionRecord>>;
}
