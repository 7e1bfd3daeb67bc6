//! Log scanner - locates log sources and parses candidate error events
//!
//! Two line grammars, tried in order:
//!
//! - `[YYYY-MM-DD hh:mm:ss] ERROR <sep> message` - the bracketed
//!   timestamp is captured as-is.
//! - `ERROR <sep> message` - no timestamp in the line; one is
//!   synthesized from the wall clock at parse time.
//!
//! `<sep>` is `-`, an em-dash, or `:`. Anything else is dropped.
//!
//! Dedup compares raw timestamp strings lexicographically against the
//! persisted watermark. That is correct for the fixed-width formats
//! above and is kept for compatibility with existing state files. The
//! new watermark is the wall-clock time when scanning finishes, not
//! the max event timestamp, so log writes buffered across a scan can
//! be skipped on the next run. Both behaviors are deliberate.

use crate::error_type::ErrorType;
use crate::types::{now_timestamp, ErrorEvent, TriageState};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Candidate log sources, fixed order, relative to the workspace root.
/// All existing sources are scanned and merged.
pub const LOG_SOURCES: [&str; 4] = ["app.log", "logs/app.log", "error.log", "logs/error.log"];

static TIMESTAMPED_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\[(\d{4}-\d{2}-\d{2}\s[\d:]+)\]\s*ERROR\s*[-\u{2013}:]\s*(.*)")
        .expect("timestamped line pattern")
});

static UNTIMED_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)ERROR\s*[-\u{2013}:]\s*(.*)").expect("untimed line pattern"));

/// Result of one scan pass over all candidate sources.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// New events, in source order, strictly past the prior watermark.
    pub events: Vec<ErrorEvent>,
    /// Wall-clock time when scanning finished; becomes the next
    /// watermark.
    pub checked_at: String,
}

/// Parse one log line into a candidate error event.
pub fn parse_log_line(line: &str) -> Option<ErrorEvent> {
    if let Some(caps) = TIMESTAMPED_LINE.captures(line) {
        let message = caps[2].trim().to_string();
        let error_type = ErrorType::classify(&message);
        return Some(ErrorEvent {
            timestamp: caps[1].to_string(),
            error_type,
            is_automated_fix_possible: error_type.is_fixable(),
            message,
        });
    }

    let caps = UNTIMED_LINE.captures(line)?;
    let message = caps[1].trim().to_string();
    let error_type = ErrorType::classify(&message);
    Some(ErrorEvent {
        timestamp: now_timestamp(),
        error_type,
        is_automated_fix_possible: error_type.is_fixable(),
        message,
    })
}

/// Scans the fixed list of candidate log files under a workspace root.
#[derive(Debug, Clone)]
pub struct LogScanner {
    root: PathBuf,
}

impl LogScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Scan all existing sources and return events newer than the
    /// state's watermark. Missing files are skipped; unreadable files
    /// log a warning and are skipped; the scan itself never fails.
    pub fn scan(&self, state: &TriageState) -> ScanOutcome {
        let mut events = Vec::new();

        for source in LOG_SOURCES {
            let path = self.root.join(source);
            if !path.exists() {
                debug!("Log file not found: {}", path.display());
                continue;
            }

            info!("Reading log file: {}", path.display());
            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    warn!("Failed to read {}: {}", path.display(), e);
                    continue;
                }
            };

            for line in content.lines() {
                if line.trim().is_empty() {
                    continue;
                }
                if let Some(event) = parse_log_line(line) {
                    if is_past_watermark(&event, state) {
                        events.push(event);
                    }
                }
            }
        }

        ScanOutcome {
            events,
            checked_at: now_timestamp(),
        }
    }
}

/// Plain lexicographic string comparison, strictly greater than the
/// watermark. No watermark admits everything.
fn is_past_watermark(event: &ErrorEvent, state: &TriageState) -> bool {
    match state.watermark.as_deref() {
        Some(watermark) => event.timestamp.as_str() > watermark,
        None => true,
    }
}

/// Advance the watermark to the scan's finish time and bump the
/// detection counter. The caller persists immediately afterwards.
pub fn record_scan(state: &mut TriageState, outcome: &ScanOutcome) {
    state.watermark = Some(outcome.checked_at.clone());
    state.counters.total_detected += outcome.events.len() as u64;
}
