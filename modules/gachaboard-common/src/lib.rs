pub mod accounts;
pub mod config;
pub mod error;
pub mod types;

pub use accounts::SyntheticAccounts;
pub use config::*;
pub use error::GachaboardError;
pub use types::*;
