//! Triaged - Automated error-log triage daemon
//!
//! Scans application logs for known failure modes, applies canned
//! remediations where one exists, and records manual-intervention
//! notifications for everything else.

use anyhow::Result;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use triaged::config::TriagedConfig;
use triaged::orchestrator;
use triage_common::StateStore;

#[derive(Parser)]
#[command(name = "triaged")]
#[command(about = "Automated error-log triage for long-lived processes", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one triage cycle and print the summary
    Run,

    /// Run triage cycles periodically until interrupted
    Watch {
        /// Seconds between cycles (overrides the config file)
        #[arg(long)]
        interval: Option<u64>,
    },

    /// Show counters, watermark, and recent history
    Status,

    /// Show recent manual-intervention notifications
    Notifications {
        /// Maximum entries to show, most recent last
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = TriagedConfig::load();
    let root = config.effective_root();

    match cli.command {
        Commands::Run => {
            let summary = orchestrator::run_cycle(&root)?;
            println!("{}", summary.render());
        }
        Commands::Watch { interval } => {
            let secs = interval.unwrap_or(config.scan_interval_secs).max(1);
            watch_loop(&root, secs).await?;
        }
        Commands::Status => print_status(&root),
        Commands::Notifications { limit } => print_notifications(&root, limit),
    }

    Ok(())
}

/// Periodic cycles. A persistence failure aborts the loop; everything
/// else is already degraded inside the cycle.
async fn watch_loop(root: &Path, interval_secs: u64) -> Result<()> {
    info!(
        "triaged v{} watching {} every {}s",
        env!("CARGO_PKG_VERSION"),
        root.display(),
        interval_secs
    );

    let mut ticker = tokio::time::interval(std::time::Duration::from_secs(interval_secs));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match orchestrator::run_cycle(root) {
                    Ok(summary) => {
                        if summary.total_processed > 0 {
                            println!("{}", summary.render());
                        } else {
                            info!("No errors detected in this scan cycle");
                        }
                    }
                    Err(e) => {
                        error!("Cycle aborted: {:#}", e);
                        return Err(e);
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down gracefully");
                return Ok(());
            }
        }
    }
}

fn print_status(root: &Path) {
    let store = StateStore::new(root);
    let state = store.load();

    println!("{}", "Triage status".bold());
    println!(
        "  Watermark:      {}",
        state.watermark.as_deref().unwrap_or("(none - no scan yet)")
    );
    println!("  Total detected: {}", state.counters.total_detected);
    println!(
        "  Total resolved: {}",
        state.counters.total_resolved.to_string().green()
    );
    println!(
        "  Total failed:   {}",
        state.counters.total_failed.to_string().yellow()
    );

    if !state.resolved_history.is_empty() {
        println!("\n{}", "Recent fixes".bold());
        for record in state.resolved_history.iter().rev().take(5) {
            println!(
                "  {} {} ({})",
                record.resolved_at,
                record.error_type.to_string().green(),
                record.action
            );
        }
    }

    if !state.failed_history.is_empty() {
        println!("\n{}", "Recent escalations".bold());
        for record in state.failed_history.iter().rev().take(5) {
            println!(
                "  {} {}",
                record.failed_at,
                record.error_type.to_string().yellow()
            );
        }
    }
}

fn print_notifications(root: &Path, limit: usize) {
    let store = StateStore::new(root);
    let notifications = store.load_notifications();

    if notifications.is_empty() {
        println!("No notifications recorded.");
        return;
    }

    let start = notifications.len().saturating_sub(limit);
    for notification in &notifications[start..] {
        let severity = notification.severity.to_string();
        let tag = match severity.as_str() {
            "CRITICAL" => severity.red().to_string(),
            "HIGH" => severity.yellow().to_string(),
            _ => severity,
        };
        println!(
            "{} [{}] {}: {}",
            notification.notified_at, tag, notification.error_type, notification.message
        );
    }
}
