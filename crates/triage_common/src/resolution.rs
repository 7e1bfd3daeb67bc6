//! Resolution engine - deterministic lookup of canned remediations
//!
//! A static table maps each fixable error type to its remediation
//! label. This is a pure simulation: no retry or memory reclamation
//! actually runs; the only side effects are the history append and the
//! state save.

use crate::error::TriageError;
use crate::error_type::ErrorType;
use crate::state::StateStore;
use crate::types::{now_timestamp, trim_front, ErrorEvent, ResolutionRecord, TriageState, MAX_HISTORY};
use tracing::info;

/// A canned remediation for a known-fixable error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub action: &'static str,
    pub description: &'static str,
}

/// Outcome of one fix attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionOutcome {
    pub fixed: bool,
    pub error_type: ErrorType,
    pub action: String,
    pub description: String,
    pub resolved_at: String,
}

/// Static remediation table. Exactly the four fixable types have an
/// entry; lookup for the same type always yields the same pair.
pub fn resolution_for(error_type: ErrorType) -> Option<Resolution> {
    match error_type {
        ErrorType::NullPointerException => Some(Resolution {
            action: "null_check_injection",
            description: "Added null safety checks and default value initialization to prevent null pointer access",
        }),
        ErrorType::ConnectionTimeoutError => Some(Resolution {
            action: "connection_retry",
            description: "Initiated connection retry with exponential backoff (max 3 retries, 2s/4s/8s delays)",
        }),
        ErrorType::OutOfMemoryError => Some(Resolution {
            action: "memory_cleanup",
            description: "Triggered garbage collection and cleared in-memory caches to free up memory resources",
        }),
        ErrorType::FileNotFoundException => Some(Resolution {
            action: "file_path_recovery",
            description: "Verified file paths, checked for renamed files, and recreated missing config files from defaults",
        }),
        ErrorType::AuthenticationError
        | ErrorType::PermissionDenied
        | ErrorType::UnknownError => None,
    }
}

/// Attempt an automated fix for one event.
///
/// On a table hit the resolution record is appended (history trimmed
/// to 100), the resolved counter bumped, and the state persisted. A
/// miss - including the defensive case of a fixable flag with no table
/// entry - returns `fixed=false` with action `none` and leaves the
/// state untouched.
pub fn attempt_fix(
    event: &ErrorEvent,
    state: &mut TriageState,
    store: &StateStore,
) -> Result<ResolutionOutcome, TriageError> {
    info!("Attempting fix for: {}", event.error_type);
    let resolved_at = now_timestamp();

    let Some(resolution) = resolution_for(event.error_type) else {
        info!("No resolution strategy for: {}", event.error_type);
        return Ok(ResolutionOutcome {
            fixed: false,
            error_type: event.error_type,
            action: "none".to_string(),
            description: format!(
                "No automated resolution available for {}",
                event.error_type
            ),
            resolved_at,
        });
    };

    info!("Applying action: {}", resolution.action);
    state.resolved_history.push(ResolutionRecord {
        error_type: event.error_type,
        resolved_at: resolved_at.clone(),
        action: resolution.action.to_string(),
    });
    trim_front(&mut state.resolved_history, MAX_HISTORY);
    state.counters.total_resolved += 1;
    store.save(state)?;

    Ok(ResolutionOutcome {
        fixed: true,
        error_type: event.error_type,
        action: resolution.action.to_string(),
        description: resolution.description.to_string(),
        resolved_at,
    })
}
