//! Library crate for risk-recon: async shell execution, the OSINT scan chain,
//! and TXT/CSV/JSON export of collected results.
pub mod catalog;
pub mod chain;
pub mod config;
pub mod error;
pub mod executor;
pub mod export;
pub mod logging;
pub mod session;
pub mod store;
pub mod types;

pub use error::{CommandError, ExportError};
pub use executor::Executor;
pub use session::Session;
pub use types::{ExecutionState, ResultRecord, ScanKind, ScanStep};
