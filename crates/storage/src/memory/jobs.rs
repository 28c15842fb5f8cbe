// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::MemoryStore;
use crate::page::{Page, PageRequest};
use crate::repository::{JobCreate, JobRepository, Repository};
use chrono::{DateTime, Duration, Utc};
use fulcrum_core::{AgentId, AuthScope, Job, JobId, JobState, Result, ServiceId};

impl Repository<Job, JobId, JobCreate> for MemoryStore {
    fn create(&self, fields: JobCreate) -> Result<Job> {
        let now = self.clock().now();
        let job = Job::new(
            fields.service_id,
            fields.agent_id,
            fields.provider_id,
            fields.consumer_id,
            fields.action,
            fields.priority,
            now,
        );
        self.with_inner(|inner| {
            inner.jobs.insert(job.id(), job.clone());
        });
        Ok(job)
    }

    fn save(&self, entity: &Job) -> Result<Job> {
        self.with_inner(|inner| {
            inner.jobs.insert(entity.id(), entity.clone());
        });
        Ok(entity.clone())
    }

    fn delete(&self, id: JobId) -> Result<()> {
        self.with_inner(|inner| inner.jobs.remove(&id));
        Ok(())
    }

    fn find_by_id(&self, id: JobId) -> Result<Option<Job>> {
        Ok(self.with_inner(|inner| inner.jobs.get(&id).cloned()))
    }

    fn list(&self, scope: AuthScope, page: PageRequest) -> Result<Page<Job>> {
        let items: Vec<Job> = self.with_inner(|inner| {
            inner
                .jobs
                .values()
                .filter(|j| scope.provider_id.is_none_or(|id| id == j.provider_id))
                .filter(|j| scope.consumer_id.is_none_or(|id| id == j.consumer_id))
                .filter(|j| scope.agent_id.is_none_or(|id| id == j.agent_id))
                .cloned()
                .collect()
        });
        let total = items.len() as u64;
        Ok(Page::new(items, page, total))
    }

    fn exists(&self, id: JobId) -> Result<bool> {
        Ok(self.with_inner(|inner| inner.jobs.contains_key(&id)))
    }
}

impl JobRepository for MemoryStore {
    fn get_pending_jobs_for_agent(&self, agent_id: AgentId, limit: u32) -> Result<Vec<Job>> {
        Ok(self.with_inner(|inner| {
            let mut jobs: Vec<Job> = inner
                .jobs
                .values()
                .filter(|j| j.agent_id == agent_id && j.state == JobState::Pending)
                .cloned()
                .collect();
            jobs.sort_by_key(|j| (j.priority, j.base.created_at));
            jobs.truncate(limit as usize);
            jobs
        }))
    }

    fn count_non_terminal_by_service(&self, service_id: ServiceId) -> Result<u64> {
        Ok(self.with_inner(|inner| {
            inner
                .jobs
                .values()
                .filter(|j| j.service_id == service_id && j.is_non_terminal())
                .count() as u64
        }))
    }

    fn get_timed_out_jobs(&self, timeout: Duration, now: DateTime<Utc>) -> Result<Vec<Job>> {
        Ok(self.with_inner(|inner| {
            inner
                .jobs
                .values()
                .filter(|j| {
                    j.state == JobState::Processing
                        && j.claimed_at.is_some_and(|claimed| claimed + timeout < now)
                })
                .cloned()
                .collect()
        }))
    }

    fn delete_old_completed_jobs(&self, retention: Duration, now: DateTime<Utc>) -> Result<u64> {
        Ok(self.with_inner(|inner| {
            let ids: Vec<JobId> = inner
                .jobs
                .values()
                .filter(|j| {
                    j.state.is_terminal()
                        && j.completed_at.is_some_and(|completed| completed + retention < now)
                })
                .map(|j| j.id())
                .collect();
            for id in &ids {
                inner.jobs.remove(id);
            }
            ids.len() as u64
        }))
    }
}
