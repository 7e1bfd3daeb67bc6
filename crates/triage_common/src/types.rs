//! Shared triage records and persisted state shapes
//!
//! On-disk JSON keeps the camelCase key layout of the original state
//! files, so an existing `.triage-state.json` keeps loading across the
//! port.

use crate::error_type::{ErrorType, Severity};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Maximum retained entries per history list.
pub const MAX_HISTORY: usize = 100;

/// Maximum retained notifications.
pub const MAX_NOTIFICATIONS: usize = 200;

/// Current wall-clock time, RFC 3339 with millisecond precision.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A single error occurrence parsed out of a log line.
/// Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEvent {
    pub timestamp: String,
    pub error_type: ErrorType,
    pub message: String,
    pub is_automated_fix_possible: bool,
}

/// Append-only record of a successful automated fix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionRecord {
    pub error_type: ErrorType,
    pub resolved_at: String,
    pub action: String,
}

/// Append-only record of an escalation to manual review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureRecord {
    pub error_type: ErrorType,
    pub failed_at: String,
    pub reason: String,
}

/// A manual-intervention notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub error_type: ErrorType,
    pub message: String,
    pub severity: Severity,
    pub notified_at: String,
    pub requires_manual_intervention: bool,
}

/// Running totals across the process lifetime. Monotonically
/// non-decreasing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Counters {
    pub total_detected: u64,
    pub total_resolved: u64,
    pub total_failed: u64,
}

/// The persisted triage state record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TriageState {
    /// Dedup cutoff: events whose timestamp sorts lexicographically at
    /// or below this string are not reprocessed.
    #[serde(rename = "lastCheckedTimestamp")]
    pub watermark: Option<String>,
    /// Successful automated fixes, most-recent-last, capped at 100.
    #[serde(rename = "resolvedErrors")]
    pub resolved_history: Vec<ResolutionRecord>,
    /// Escalations, most-recent-last, capped at 100.
    #[serde(rename = "failedErrors")]
    pub failed_history: Vec<FailureRecord>,
    #[serde(rename = "stats")]
    pub counters: Counters,
}

/// Drop entries from the front until `v` fits within `cap`.
pub fn trim_front<T>(v: &mut Vec<T>, cap: usize) {
    if v.len() > cap {
        let excess = v.len() - cap;
        v.drain(..excess);
    }
}
