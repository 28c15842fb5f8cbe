// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job dispatch pipeline (spec.md §4.7).
//!
//! Agents drive these methods directly — `list_pending`/`claim`/`complete`/
//! `fail` are the only four Job Commander entry points an Agent identity
//! calls. `fail_timeouts`/`gc_completed_jobs` are background-loop-only
//! (`crate::maintenance`).

use crate::service::{self, to_doc as service_doc};
use crate::Engine;
use fulcrum_audit::EntityScope;
use fulcrum_auth::{Action, Identity, Subject};
use fulcrum_core::{
    AgentId, AuthScope, Error, Job, JobCompletionPayload, JobId, JobState, Result, ServiceAction,
};

/// The number of pending Jobs a single poll returns, matching the
/// `limit` parameter Agents pass to `ListPending` (spec.md §4.7).
pub const DEFAULT_POLL_LIMIT: u32 = 10;

/// The error message the background reaper records on a Job it fails for
/// exceeding its processing timeout (spec.md §4.7).
const TIMEOUT_ERROR_MESSAGE: &str = "Job marked as failed due to exceeding maximum processing time";

/// Summary returned by the background reaper for one sweep.
#[derive(Debug, Clone, Copy, Default)]
pub struct JobDispatchResult {
    pub timed_out: u64,
    pub garbage_collected: u64,
}

impl Engine {
    /// `ListPending(agentID, limit)` (spec.md §4.7): Agent-only, ordered
    /// `(priority asc, created_at asc)`.
    #[tracing::instrument(skip(self, identity), fields(entity_id = %agent_id))]
    pub fn list_pending_jobs(
        &self,
        identity: &Identity,
        agent_id: AgentId,
        limit: u32,
    ) -> Result<Vec<Job>> {
        let agent = self
            .store
            .agents()
            .find_by_id(agent_id)?
            .ok_or_else(|| Error::not_found("agent", agent_id))?;
        self.authorize(identity, Subject::Job, Action::ListPending, agent.scope())?;
        self.store.jobs().get_pending_jobs_for_agent(agent_id, limit)
    }

    /// `Claim(jobID)` (spec.md §4.7, §3): moves a Pending Job to Processing
    /// and stamps `claimed_at`.
    #[tracing::instrument(skip(self, identity), fields(entity_id = %job_id))]
    pub fn claim_job(&self, identity: &Identity, job_id: JobId) -> Result<Job> {
        let job = self
            .store
            .jobs()
            .find_by_id(job_id)?
            .ok_or_else(|| Error::not_found("job", job_id))?;
        let scope = AuthScope::agent(job.agent_id, job.provider_id);
        self.authorize(identity, Subject::Job, Action::Claim, scope)?;
        self.store.atomic(|tx| {
            let mut job = tx
                .jobs()
                .find_by_id(job_id)?
                .ok_or_else(|| Error::not_found("job", job_id))?;
            if job.state != JobState::Pending {
                return Err(Error::conflict(format!("job is {} not pending", job.state)));
            }
            let now = tx.clock().now();
            job.state = JobState::Processing;
            job.claimed_at = Some(now);
            let saved = tx.jobs().save(&job)?;
            self.audit_create(
                identity,
                "JobClaimed",
                saved.id(),
                EntityScope {
                    agent_id: Some(saved.agent_id),
                    provider_id: Some(saved.provider_id),
                    consumer_id: Some(saved.consumer_id),
                    ..Default::default()
                },
            )?;
            Ok(saved)
        })
    }

    /// `Complete(jobID, payload)` (spec.md §4.6, §4.7): runs the Service
    /// completion handler, then marks the Job Completed.
    #[tracing::instrument(skip(self, identity, payload), fields(entity_id = %job_id))]
    pub fn complete_job(
        &self,
        identity: &Identity,
        job_id: JobId,
        payload: JobCompletionPayload,
    ) -> Result<Job> {
        let job = self
            .store
            .jobs()
            .find_by_id(job_id)?
            .ok_or_else(|| Error::not_found("job", job_id))?;
        let scope = AuthScope::agent(job.agent_id, job.provider_id);
        self.authorize(identity, Subject::Job, Action::Complete, scope)?;
        self.store.atomic(|tx| {
            let mut job = tx
                .jobs()
                .find_by_id(job_id)?
                .ok_or_else(|| Error::not_found("job", job_id))?;
            if job.state != JobState::Processing {
                return Err(Error::conflict(format!("job is {} not processing", job.state)));
            }
            let service_before = tx
                .services()
                .find_by_id(job.service_id)?
                .ok_or_else(|| Error::not_found("service", job.service_id))?;
            if let Some(external_id) = payload.external_id.as_deref() {
                if let Some(conflicting) = tx.services().find_by_external_id(service_before.agent_id, external_id)? {
                    if conflicting.id() != service_before.id() {
                        return Err(Error::conflict(format!(
                            "external id {external_id} already in use by another service on this agent"
                        )));
                    }
                }
            }
            let mut service_after = service_before.clone();
            Engine::apply_service_completion(&mut service_after, payload)?;
            let saved_service = tx.services().save(&service_after)?;

            let now = tx.clock().now();
            job.state = JobState::Completed;
            job.completed_at = Some(now);
            let saved_job = tx.jobs().save(&job)?;

            self.audit_update(
                identity,
                "JobCompleted",
                saved_service.id(),
                EntityScope::from(saved_service.scope()),
                &service_doc(&service_before),
                &service_doc(&saved_service),
            )?;
            Ok(saved_job)
        })
    }

    /// `Fail(jobID, errorMessage)` (spec.md §4.6, §4.7): records the
    /// failure on the Service (`failed_action`/`error_message`) and marks
    /// the Job Failed; the Service's state does not move, so a later
    /// `Retry` can reissue the same action.
    #[tracing::instrument(skip(self, identity, error_message), fields(entity_id = %job_id))]
    pub fn fail_job(&self, identity: &Identity, job_id: JobId, error_message: String) -> Result<Job> {
        let job = self
            .store
            .jobs()
            .find_by_id(job_id)?
            .ok_or_else(|| Error::not_found("job", job_id))?;
        let scope = AuthScope::agent(job.agent_id, job.provider_id);
        self.authorize(identity, Subject::Job, Action::Fail, scope)?;
        self.store.atomic(|tx| {
            let mut job = tx
                .jobs()
                .find_by_id(job_id)?
                .ok_or_else(|| Error::not_found("job", job_id))?;
            if job.state != JobState::Processing {
                return Err(Error::conflict(format!("job is {} not processing", job.state)));
            }
            let service_before = tx
                .services()
                .find_by_id(job.service_id)?
                .ok_or_else(|| Error::not_found("service", job.service_id))?;
            let mut service_after = service_before.clone();
            Engine::apply_service_failure(&mut service_after, job.action, error_message.clone());
            let saved_service = tx.services().save(&service_after)?;

            let now = tx.clock().now();
            job.state = JobState::Failed;
            job.completed_at = Some(now);
            job.error_message = Some(error_message);
            let saved_job = tx.jobs().save(&job)?;

            self.audit_update(
                identity,
                "JobFailed",
                saved_service.id(),
                EntityScope::from(saved_service.scope()),
                &service_doc(&service_before),
                &service_doc(&saved_service),
            )?;
            Ok(saved_job)
        })
    }

    /// Background reaper (spec.md §4.7): Processing Jobs whose
    /// `claimed_at + timeout` has elapsed are failed with a synthetic
    /// timeout message, exactly as `fail_job` would, but without an Agent
    /// identity driving the call.
    #[tracing::instrument(skip(self))]
    pub fn fail_timed_out_jobs(&self, timeout: chrono::Duration) -> Result<u64> {
        let now = self.clock().now();
        let timed_out = self.store.jobs().get_timed_out_jobs(timeout, now)?;
        let mut count = 0u64;
        for mut job in timed_out {
            let failed = self.store.atomic(|tx| {
                let now = tx.clock().now();
                let service_before = match tx.services().find_by_id(job.service_id)? {
                    Some(service) => service,
                    None => return Ok(false),
                };
                let mut service_after = service_before.clone();
                Engine::apply_service_failure(
                    &mut service_after,
                    job.action,
                    TIMEOUT_ERROR_MESSAGE.to_string(),
                );
                let saved_service = tx.services().save(&service_after)?;
                job.state = JobState::Failed;
                job.completed_at = Some(now);
                job.error_message = Some(TIMEOUT_ERROR_MESSAGE.to_string());
                tx.jobs().save(&job)?;
                self.audit_update(
                    &system_identity(),
                    "JobTimedOut",
                    saved_service.id(),
                    EntityScope::from(saved_service.scope()),
                    &service_doc(&service_before),
                    &service_doc(&saved_service),
                )?;
                Ok(true)
            })?;
            if failed {
                count += 1;
            }
        }
        Ok(count)
    }

    /// `DeleteOldCompletedJobs` (spec.md §4.7): periodic GC for terminal
    /// Jobs past the retention window.
    #[tracing::instrument(skip(self))]
    pub fn gc_completed_jobs(&self, retention: chrono::Duration) -> Result<u64> {
        let now = self.clock().now();
        self.store.jobs().delete_old_completed_jobs(retention, now)
    }
}

/// The identity background loops act under — `FulcrumAdmin` with no scope
/// pointers, since the reaper acts on behalf of the control plane itself,
/// never on behalf of a specific caller.
fn system_identity() -> fulcrum_auth::Identity {
    fulcrum_auth::Identity::admin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_poll_limit_is_positive() {
        assert!(DEFAULT_POLL_LIMIT > 0);
    }

    #[test]
    fn job_dispatch_result_defaults_to_zero() {
        let result = JobDispatchResult::default();
        assert_eq!(result.timed_out, 0);
        assert_eq!(result.garbage_collected, 0);
    }
}
