//! Core error type
//!
//! Only persistence failures surface as errors; everything the triage
//! policy treats as fail-open (missing logs, bad lines, corrupt state)
//! degrades with a log signal instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TriageError {
    #[error("state persistence failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("state serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
