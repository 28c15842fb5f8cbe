// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Background maintenance (spec.md §4.8).
//!
//! Every method here is driven by `crates/daemon`'s scheduled loops, never
//! by an external identity — there is no `authorize` call in this module.

use crate::Engine;
use fulcrum_core::Result;

/// Tallies a single maintenance sweep across its component jobs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaintenanceReport {
    pub agents_disconnected: u64,
    pub jobs_timed_out: u64,
    pub jobs_garbage_collected: u64,
}

impl Engine {
    /// Connected Agents with no heartbeat inside `threshold` move to
    /// Disconnected (spec.md §4.8).
    pub fn mark_inactive_agents_disconnected(&self, threshold: chrono::Duration) -> Result<u64> {
        let now = self.clock().now();
        self.store.agents().mark_inactive_as_disconnected(threshold, now)
    }

    /// Runs every component of one maintenance sweep and totals the result.
    #[tracing::instrument(skip(self))]
    pub fn run_maintenance(
        &self,
        job_timeout: chrono::Duration,
        agent_inactivity_threshold: chrono::Duration,
        job_retention: chrono::Duration,
    ) -> Result<MaintenanceReport> {
        let agents_disconnected = self.mark_inactive_agents_disconnected(agent_inactivity_threshold)?;
        let jobs_timed_out = self.fail_timed_out_jobs(job_timeout)?;
        let jobs_garbage_collected = self.gc_completed_jobs(job_retention)?;
        Ok(MaintenanceReport {
            agents_disconnected,
            jobs_timed_out,
            jobs_garbage_collected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maintenance_report_defaults_to_zero() {
        let report = MaintenanceReport::default();
        assert_eq!(report.agents_disconnected, 0);
        assert_eq!(report.jobs_timed_out, 0);
        assert_eq!(report.jobs_garbage_collected, 0);
    }
}
