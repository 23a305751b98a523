//! Read contracts for the external collaborators, plus their Postgres and
//! in-memory implementations. This core never writes to any of them.

pub mod memory;
pub mod postgres;
pub mod traits;

pub use memory::{MemoryDirectory, MemoryEventLog, MemoryLedger, MemoryProgression};
pub use postgres::{PgDirectory, PgEventLog, PgProgression, PgProviderLedger};
pub use traits::{EventSource, ProgressionStore, ProviderLedger, UserDirectory};
