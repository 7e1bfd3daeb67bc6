//! Configuration for triaged.
//!
//! Loads `<root>/triaged.toml` or uses defaults. The workspace root
//! itself comes from `$TRIAGED_ROOT`, then `$HOME`, then the current
//! directory; the config file may override it for everything but the
//! location of the config file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use triage_common::state::default_workspace_root;

/// Config file name, relative to the workspace root.
pub const CONFIG_FILE: &str = "triaged.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriagedConfig {
    /// Override for the workspace root holding logs and state files.
    #[serde(default)]
    pub workspace_root: Option<PathBuf>,

    /// Seconds between cycles in watch mode.
    #[serde(default = "default_scan_interval")]
    pub scan_interval_secs: u64,
}

fn default_scan_interval() -> u64 {
    60
}

impl Default for TriagedConfig {
    fn default() -> Self {
        Self {
            workspace_root: None,
            scan_interval_secs: default_scan_interval(),
        }
    }
}

impl TriagedConfig {
    /// Load from the default location under the resolved root.
    pub fn load() -> Self {
        Self::load_from(&default_workspace_root().join(CONFIG_FILE))
    }

    /// Load from an explicit path. Missing file means defaults; an
    /// unparsable file warns and falls back to defaults.
    pub fn load_from(path: &Path) -> Self {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(_) => return Self::default(),
        };
        match toml::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring unparsable config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// The root all log sources and state files live under.
    pub fn effective_root(&self) -> PathBuf {
        self.workspace_root
            .clone()
            .unwrap_or_else(default_workspace_root)
    }
}
