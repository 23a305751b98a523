//! The aggregation and ranking engine.
//!
//! Batch, single-snapshot semantics: each run selects a closed event window,
//! reduces it to per-user metric totals, scores them, optionally gates on
//! eligibility, resolves display names, and emits a deterministically
//! ordered leaderboard. Nothing is persisted; re-running the same window
//! against the same stores yields identical output.

pub mod aggregate;
pub mod eligibility;
pub mod extract;
pub mod identity;
pub mod rank;
pub mod score;
pub mod snapshot;
pub mod window;

pub use snapshot::{run_snapshot, SnapshotDeps};
