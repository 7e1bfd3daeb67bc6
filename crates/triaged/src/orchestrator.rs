//! Cycle orchestration - the thin caller around the triage core
//!
//! One cycle: load state, scan, advance the watermark and persist,
//! then route each event to the resolution engine (fixable) or the
//! notification sink (everything else), and fold the per-event
//! outcomes into a summary. Parse and classification degradation never
//! aborts a cycle; persistence failures do.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;
use triage_common::{
    notify, resolution, scanner, now_timestamp, ErrorType, LogScanner, StateStore,
};

/// What happened to one event during a cycle.
#[derive(Debug, Clone)]
pub struct EventOutcome {
    pub error_type: ErrorType,
    pub was_fixed: bool,
    pub action: String,
    pub details: String,
    pub processed_at: String,
}

/// Aggregated result of one triage cycle.
#[derive(Debug, Clone)]
pub struct CycleSummary {
    pub total_processed: usize,
    pub total_fixed: usize,
    pub total_notified: usize,
    pub completed_at: String,
    pub outcomes: Vec<EventOutcome>,
}

/// Run one full triage cycle against a workspace root.
pub fn run_cycle(root: &Path) -> Result<CycleSummary> {
    let store = StateStore::new(root);
    let log_scanner = LogScanner::new(root);

    let mut state = store.load();
    let outcome = log_scanner.scan(&state);
    info!("Scan complete. Found {} new errors.", outcome.events.len());

    scanner::record_scan(&mut state, &outcome);
    store
        .save(&state)
        .context("persisting triage state after scan")?;

    let mut outcomes = Vec::with_capacity(outcome.events.len());
    for event in &outcome.events {
        let processed_at = now_timestamp();

        if event.is_automated_fix_possible {
            let fix = resolution::attempt_fix(event, &mut state, &store)
                .with_context(|| format!("applying fix for {}", event.error_type))?;
            if fix.fixed {
                outcomes.push(EventOutcome {
                    error_type: event.error_type,
                    was_fixed: true,
                    action: fix.action,
                    details: fix.description,
                    processed_at,
                });
                continue;
            }
            // Fixable flag without a table entry falls through to the
            // notification path.
        }

        let notification = notify::notify(event, &mut state, &store)
            .with_context(|| format!("recording notification for {}", event.error_type))?;
        outcomes.push(EventOutcome {
            error_type: event.error_type,
            was_fixed: false,
            action: "notification_sent".to_string(),
            details: notify::notification_message(event),
            processed_at: notification.notified_at,
        });
    }

    let total_fixed = outcomes.iter().filter(|o| o.was_fixed).count();
    Ok(CycleSummary {
        total_processed: outcomes.len(),
        total_fixed,
        total_notified: outcomes.len() - total_fixed,
        completed_at: now_timestamp(),
        outcomes,
    })
}

impl CycleSummary {
    /// Render the banner block printed after every cycle.
    pub fn render(&self) -> String {
        let rule = "\u{2501}".repeat(35);
        let mut lines = vec![
            rule.clone(),
            "ERROR TRIAGE SUMMARY".to_string(),
            rule.clone(),
            format!("  Total Errors Processed: {}", self.total_processed),
            format!("  Automatically Fixed:    {}", self.total_fixed),
            format!("  Notifications Sent:     {}", self.total_notified),
            format!("  Completed At:           {}", self.completed_at),
            String::new(),
        ];

        if self.outcomes.is_empty() {
            lines.push("  No errors detected in this scan cycle.".to_string());
        } else {
            lines.push("  Details:".to_string());
            for outcome in &self.outcomes {
                let tag = if outcome.was_fixed { "FIXED" } else { "NOTIFIED" };
                lines.push(format!(
                    "    [{}] {}: {}",
                    tag, outcome.error_type, outcome.action
                ));
            }
        }
        lines.push(rule);
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_cycle_routes_fixable_and_unfixable_events() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("app.log"),
            "[2024-01-01 10:00:00] ERROR - NullPointerException: x is null\n\
             [2024-01-01 10:01:00] ERROR - AuthenticationError: bad token\n\
             [2024-01-01 10:02:00] ERROR - something weird happened\n",
        )
        .unwrap();

        let summary = run_cycle(dir.path()).unwrap();
        assert_eq!(summary.total_processed, 3);
        assert_eq!(summary.total_fixed, 1);
        assert_eq!(summary.total_notified, 2);

        assert!(summary.outcomes[0].was_fixed);
        assert_eq!(summary.outcomes[0].action, "null_check_injection");
        assert_eq!(summary.outcomes[1].action, "notification_sent");
        assert_eq!(summary.outcomes[2].error_type, ErrorType::UnknownError);
    }

    #[test]
    fn test_empty_cycle_summary_renders_no_errors_line() {
        let dir = TempDir::new().unwrap();
        let summary = run_cycle(dir.path()).unwrap();
        assert_eq!(summary.total_processed, 0);
        assert!(summary.render().contains("No errors detected"));
    }

    #[test]
    fn test_render_lists_per_event_outcomes() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("error.log"),
            "[2024-01-01 10:00:00] ERROR - OutOfMemoryError: heap\n\
             [2024-01-01 10:01:00] ERROR - PermissionDenied: forbidden\n",
        )
        .unwrap();

        let rendered = run_cycle(dir.path()).unwrap().render();
        assert!(rendered.contains("[FIXED] OutOfMemoryError: memory_cleanup"));
        assert!(rendered.contains("[NOTIFIED] PermissionDenied: notification_sent"));
    }
}
