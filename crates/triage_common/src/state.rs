//! State store - the two persisted records under the workspace root
//!
//! `.triage-state.json` holds the watermark, bounded histories, and
//! counters. `.triage-notifications.json` holds the independent
//! bounded notification list. Writes are atomic (temp file + rename);
//! loads are fail-open: a missing or unparsable file yields a fresh
//! zero state so corruption never blocks triage. Parse failures are
//! logged, not surfaced.
//!
//! Single concurrent writer assumed. Two overlapping cycles against
//! the same root can lose updates; there is no lock or version check.

use crate::error::TriageError;
use crate::types::{Notification, TriageState};
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Triage state file name, relative to the workspace root.
pub const STATE_FILE: &str = ".triage-state.json";

/// Notification log file name, relative to the workspace root.
pub const NOTIFICATIONS_FILE: &str = ".triage-notifications.json";

/// Workspace root resolution: `$TRIAGED_ROOT`, then `$HOME`, then the
/// current directory.
pub fn default_workspace_root() -> PathBuf {
    if let Ok(root) = std::env::var("TRIAGED_ROOT") {
        return PathBuf::from(root);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home);
    }
    PathBuf::from(".")
}

/// Write data to a file atomically using temp file + rename, so the
/// file is never observed in a partial state.
fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    let mut file = File::create(&temp_path)?;
    file.write_all(data)?;
    file.sync_all()?;

    fs::rename(&temp_path, path)?;
    Ok(())
}

/// Sole owner of the persisted triage records.
#[derive(Debug, Clone)]
pub struct StateStore {
    root: PathBuf,
}

impl StateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn state_path(&self) -> PathBuf {
        self.root.join(STATE_FILE)
    }

    pub fn notifications_path(&self) -> PathBuf {
        self.root.join(NOTIFICATIONS_FILE)
    }

    /// Load the triage state, or a fresh zero state if the file is
    /// missing or unparsable.
    pub fn load(&self) -> TriageState {
        self.load_fail_open(&self.state_path())
    }

    /// Persist the triage state. Write failures propagate; there is no
    /// fallback persistence target.
    pub fn save(&self, state: &TriageState) -> Result<(), TriageError> {
        self.save_json(&self.state_path(), state)
    }

    /// Load the notification log, or an empty list.
    pub fn load_notifications(&self) -> Vec<Notification> {
        self.load_fail_open(&self.notifications_path())
    }

    /// Persist the notification log.
    pub fn save_notifications(&self, notifications: &[Notification]) -> Result<(), TriageError> {
        self.save_json(&self.notifications_path(), &notifications)
    }

    fn load_fail_open<T: Default + serde::de::DeserializeOwned>(&self, path: &Path) -> T {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return T::default(),
            Err(e) => {
                warn!("Cannot read {}, starting fresh: {}", path.display(), e);
                return T::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(
                    "Discarding unparsable state file {}: {}",
                    path.display(),
                    e
                );
                T::default()
            }
        }
    }

    fn save_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), TriageError> {
        let content = serde_json::to_string_pretty(value)?;
        atomic_write(path, content.as_bytes())?;
        Ok(())
    }
}
