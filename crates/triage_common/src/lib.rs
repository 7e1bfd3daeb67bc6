//! Triage Common - Core of the automated error-log triage machine
//!
//! Log scanning and parsing, error classification, deduplication
//! against a persisted watermark, deterministic resolution lookup, and
//! bounded-history notification recording. The daemon in `triaged` is
//! a thin caller that runs these operations in a fixed sequence once
//! per cycle.

pub mod error;
pub mod error_type;
pub mod notify;
pub mod resolution;
pub mod scanner;
pub mod state;
pub mod types;

pub use error::TriageError;
pub use error_type::{ErrorType, Severity};
pub use scanner::{LogScanner, ScanOutcome};
pub use state::StateStore;
pub use types::*;
