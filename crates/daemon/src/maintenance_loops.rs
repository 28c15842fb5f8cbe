// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wires [`fulcrum_engine::Engine`]'s background maintenance to
//! `tokio::time::interval` loops (spec.md §5, SPEC_FULL.md §4.9).

use std::time::Duration;

use fulcrum_engine::Engine;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::settings::MaintenanceSettings;

/// Runs the maintenance sweep on a fixed interval until `shutdown` fires.
/// A single task runs `mark_inactive_agents_disconnected`,
/// `fail_timed_out_jobs`, and the completed-Job GC back to back each tick
/// — spec.md never requires them to run concurrently with each other, and
/// running them in one task keeps each sweep's log lines contiguous.
pub async fn run(engine: Engine, settings: MaintenanceSettings, shutdown: CancellationToken) {
    let mut ticker = tokio::time::interval(settings.sweep_interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("maintenance loop shutting down");
                return;
            }
            _ = ticker.tick() => {
                run_sweep(&engine, &settings);
            }
        }
    }
}

fn run_sweep(engine: &Engine, settings: &MaintenanceSettings) {
    let result = engine.run_maintenance(
        to_chrono(settings.job_timeout),
        to_chrono(settings.agent_disconnect_after),
        to_chrono(settings.completed_job_retention),
    );
    match result {
        Ok(report) => info!(
            agents_disconnected = report.agents_disconnected,
            jobs_timed_out = report.jobs_timed_out,
            jobs_garbage_collected = report.jobs_garbage_collected,
            "maintenance sweep complete"
        ),
        Err(error) => warn!(%error, "maintenance sweep failed"),
    }
}

fn to_chrono(duration: Duration) -> chrono::Duration {
    chrono::Duration::from_std(duration).unwrap_or(chrono::Duration::zero())
}
