//! Notification sink - records manual-intervention notifications
//!
//! For errors with no remediation: resolves the static severity,
//! appends a notification (log capped at 200) and a failure record
//! (history capped at 100), bumps the failed counter, and persists
//! both stores. Recording only; no paging, email, or chat delivery.

use crate::error::TriageError;
use crate::state::StateStore;
use crate::types::{
    now_timestamp, trim_front, ErrorEvent, FailureRecord, Notification, TriageState, MAX_HISTORY,
    MAX_NOTIFICATIONS,
};
use tracing::info;

/// Reason recorded against every escalation.
const ESCALATION_REASON: &str =
    "No automated resolution available - requires manual intervention";

/// Human-readable notification text embedding severity, error type,
/// and the original message.
pub fn notification_message(event: &ErrorEvent) -> String {
    format!(
        "[{}] Manual intervention required for {}: {}. \
         Automated fix is not available for this error type. \
         Please review and resolve manually.",
        event.error_type.severity(),
        event.error_type,
        event.message
    )
}

/// Record a manual-intervention notification for one event.
pub fn notify(
    event: &ErrorEvent,
    state: &mut TriageState,
    store: &StateStore,
) -> Result<Notification, TriageError> {
    let severity = event.error_type.severity();
    let notified_at = now_timestamp();

    info!("Notification: {}", notification_message(event));

    let notification = Notification {
        error_type: event.error_type,
        message: event.message.clone(),
        severity,
        notified_at: notified_at.clone(),
        requires_manual_intervention: true,
    };

    let mut notifications = store.load_notifications();
    notifications.push(notification.clone());
    trim_front(&mut notifications, MAX_NOTIFICATIONS);
    store.save_notifications(&notifications)?;

    state.failed_history.push(FailureRecord {
        error_type: event.error_type,
        failed_at: notified_at,
        reason: ESCALATION_REASON.to_string(),
    });
    trim_front(&mut state.failed_history, MAX_HISTORY);
    state.counters.total_failed += 1;
    store.save(state)?;

    Ok(notification)
}
