use thiserror::Error;

/// Crate-wide error type.
///
/// `Config` is the only variant a well-formed deployment should ever see at
/// invocation time: it means the caller handed us an impossible snapshot
/// request (inverted window, empty allowlist, ...) and the run was refused
/// before touching any store. Malformed *data* never raises an error at all —
/// degraded fields fall back to defaults per the aggregation rules.
#[derive(Error, Debug)]
pub enum GachaboardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event store error: {0}")]
    EventStore(String),

    #[error("Directory error: {0}")]
    Directory(String),

    #[error("Ledger error: {0}")]
    Ledger(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
