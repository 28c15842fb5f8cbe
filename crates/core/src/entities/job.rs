// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! [`Job`] — a unit of work dispatched to an Agent (spec.md §3, §4.7).

use crate::entities::base::BaseEntity;
use crate::entities::service::ServiceAction;
use crate::id::{AgentId, JobId, ParticipantId, ServiceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Job's lifecycle state. Transitions only `Pending -> Processing ->
/// (Completed | Failed)` (spec.md §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    Pending,
    Processing,
    Completed,
    Failed,
}

crate::simple_display! {
    JobState {
        Pending => "pending",
        Processing => "processing",
        Completed => "completed",
        Failed => "failed",
    }
}

impl JobState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Completed | JobState::Failed)
    }
}

/// Default priority for newly created Jobs. Lower values are dispatched
/// first; domain events that must preempt the queue (e.g. Delete) use a
/// lower number explicitly.
pub const DEFAULT_PRIORITY: i32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub base: BaseEntity<JobId>,
    pub service_id: ServiceId,
    pub agent_id: AgentId,
    pub provider_id: ParticipantId,
    pub consumer_id: ParticipantId,
    pub action: ServiceAction,
    pub state: JobState,
    pub priority: i32,
    pub claimed_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
}

impl Job {
    pub fn id(&self) -> JobId {
        self.base.id
    }

    pub fn new(
        service_id: ServiceId,
        agent_id: AgentId,
        provider_id: ParticipantId,
        consumer_id: ParticipantId,
        action: ServiceAction,
        priority: i32,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            base: BaseEntity::new(JobId::new(), now),
            service_id,
            agent_id,
            provider_id,
            consumer_id,
            action,
            state: JobState::Pending,
            priority,
            claimed_at: None,
            completed_at: None,
            error_message: None,
        }
    }

    pub fn is_non_terminal(&self) -> bool {
        !self.state.is_terminal()
    }
}

crate::builder! {
    pub struct JobBuilder => Job {
        set {
            state: JobState = JobState::Pending,
            priority: i32 = DEFAULT_PRIORITY,
            service_id: ServiceId = ServiceId::nil(),
            agent_id: AgentId = AgentId::nil(),
            provider_id: ParticipantId = ParticipantId::nil(),
            consumer_id: ParticipantId = ParticipantId::nil(),
            action: ServiceAction = ServiceAction::Create,
        }
        option {
            claimed_at: DateTime<Utc> = None,
            completed_at: DateTime<Utc> = None,
            error_message: String = None,
        }
        computed {
            base: BaseEntity<JobId> = BaseEntity::new(JobId::new(), Utc::now()),
        }
    }
}
