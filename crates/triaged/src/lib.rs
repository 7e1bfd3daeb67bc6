//! Triaged - Automated error-log triage daemon
//!
//! Thin orchestration around `triage_common`: runs triage cycles,
//! renders summaries, and exposes state inspection commands.

pub mod config;
pub mod orchestrator;
