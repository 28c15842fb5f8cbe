// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Repository trait contracts consumed by Commanders and background loops
//! (spec.md §6). Every repository exposes the common CRUD surface plus
//! entity-specific queries; `crates/storage::memory` is the sole
//! implementation this workspace ships.

use crate::page::{Page, PageRequest};
use chrono::{DateTime, Utc};
use fulcrum_core::{
    Agent, AgentFields, AgentId, AgentType, AgentTypeFields, AgentTypeId, AgentUpdate, AuditEntry,
    AuditEntryId, AuthScope, Job, JobId, MetricEntry, MetricEntryId, MetricType, MetricTypeId,
    Participant, ParticipantFields, ParticipantId, ParticipantUpdate, Result, Service,
    ServiceFields, ServiceGroup, ServiceGroupFields, ServiceGroupUpdate, ServiceId, ServiceType,
    ServiceTypeFields, ServiceTypeUpdate, ServiceUpdate, Token, TokenId,
};

/// Common CRUD surface every repository exposes (spec.md §6).
pub trait Repository<T, Id, Fields>: Send + Sync {
    fn create(&self, fields: Fields) -> Result<T>;
    fn save(&self, entity: &T) -> Result<T>;
    fn delete(&self, id: Id) -> Result<()>;
    fn find_by_id(&self, id: Id) -> Result<Option<T>>;
    fn list(&self, scope: AuthScope, page: PageRequest) -> Result<Page<T>>;
    fn exists(&self, id: Id) -> Result<bool>;
}

pub trait ParticipantRepository: Repository<Participant, ParticipantId, ParticipantFields> {
    /// Apply a partial update in place; returns the saved entity.
    fn update(
        &self,
        id: ParticipantId,
        update: ParticipantUpdate,
        now: DateTime<Utc>,
    ) -> Result<Participant>;
}

pub trait AgentTypeRepository: Repository<AgentType, AgentTypeId, AgentTypeFields> {
    fn update(&self, id: AgentTypeId, update: fulcrum_core::AgentTypeUpdate) -> Result<AgentType>;
}

pub trait AgentRepository: Repository<Agent, AgentId, AgentFields> {
    fn update(&self, id: AgentId, update: AgentUpdate, now: DateTime<Utc>) -> Result<Agent>;
    fn count_by_provider(&self, provider_id: ParticipantId) -> Result<u64>;
    /// Sets every Connected Agent whose `last_state_update` is older than
    /// `now - threshold` to Disconnected (spec.md §4.8). Returns the count
    /// affected.
    fn mark_inactive_as_disconnected(
        &self,
        threshold: chrono::Duration,
        now: DateTime<Utc>,
    ) -> Result<u64>;
    fn delete_by_participant_id(&self, participant_id: ParticipantId) -> Result<u64>;
}

pub trait ServiceGroupRepository:
    Repository<ServiceGroup, fulcrum_core::ServiceGroupId, ServiceGroupFields>
{
    fn update(
        &self,
        id: fulcrum_core::ServiceGroupId,
        update: ServiceGroupUpdate,
    ) -> Result<ServiceGroup>;
    fn count_by_participant(&self, participant_id: ParticipantId) -> Result<u64>;
    fn delete_by_participant_id(&self, participant_id: ParticipantId) -> Result<u64>;
}

pub trait ServiceTypeRepository:
    Repository<ServiceType, fulcrum_core::ServiceTypeId, ServiceTypeFields>
{
    fn update(
        &self,
        id: fulcrum_core::ServiceTypeId,
        update: ServiceTypeUpdate,
    ) -> Result<ServiceType>;
}

pub trait ServiceRepository: Repository<Service, ServiceId, ServiceFields> {
    fn update(&self, id: ServiceId, update: ServiceUpdate) -> Result<Service>;
    fn count_by_provider(&self, provider_id: ParticipantId) -> Result<u64>;
    fn count_by_consumer(&self, consumer_id: ParticipantId) -> Result<u64>;
    fn count_by_group(&self, group_id: fulcrum_core::ServiceGroupId) -> Result<u64>;
    fn count_by_agent(&self, agent_id: AgentId) -> Result<u64>;
    fn find_by_external_id(&self, agent_id: AgentId, external_id: &str) -> Result<Option<Service>>;
    fn delete_by_agent_id(&self, agent_id: AgentId) -> Result<u64>;
}

pub trait JobRepository: Repository<Job, JobId, JobCreate> {
    /// Pending Jobs for the caller's Agent, ordered `(priority asc,
    /// created_at asc)`, limited to `limit` items (spec.md §4.7).
    fn get_pending_jobs_for_agent(&self, agent_id: AgentId, limit: u32) -> Result<Vec<Job>>;
    fn count_non_terminal_by_service(&self, service_id: ServiceId) -> Result<u64>;
    /// Processing Jobs whose `claimed_at + timeout < now` (spec.md §4.7).
    fn get_timed_out_jobs(&self, timeout: chrono::Duration, now: DateTime<Utc>) -> Result<Vec<Job>>;
    fn delete_old_completed_jobs(
        &self,
        retention: chrono::Duration,
        now: DateTime<Utc>,
    ) -> Result<u64>;
}

/// Fields needed to create a [`Job`]; named distinctly from the entity
/// itself since (unlike the other entities) `Job`'s builder targets the
/// entity directly rather than a separate DTO (see `fulcrum_core::JobBuilder`).
pub struct JobCreate {
    pub service_id: ServiceId,
    pub agent_id: AgentId,
    pub provider_id: ParticipantId,
    pub consumer_id: ParticipantId,
    pub action: fulcrum_core::ServiceAction,
    pub priority: i32,
}

pub trait TokenRepository: Repository<Token, TokenId, TokenCreate> {
    fn find_by_hashed_value(&self, hashed_value: &str) -> Result<Option<Token>>;
    /// Cascade delete for Participant removal (spec.md §4: "Deletion of a
    /// Participant or Agent transitively deletes the entity's Tokens").
    fn delete_by_participant_id(&self, participant_id: ParticipantId) -> Result<u64>;
    fn delete_by_agent_id(&self, agent_id: AgentId) -> Result<u64>;
}

/// Fields needed to create a [`Token`]; the plaintext value never appears
/// here — only the hash the caller already computed (spec.md §4.3).
pub struct TokenCreate {
    pub name: String,
    pub role: fulcrum_core::Role,
    pub hashed_value: String,
    pub expires_at: DateTime<Utc>,
    pub participant_id: Option<ParticipantId>,
    pub agent_id: Option<AgentId>,
}

/// Append-only: no `update`/`delete` (spec.md §3 — AuditEntry is immutable).
pub trait AuditEntryRepository: Send + Sync {
    fn create(&self, entry: AuditEntry) -> Result<AuditEntry>;
    fn find_by_id(&self, id: AuditEntryId) -> Result<Option<AuditEntry>>;
    fn list(&self, scope: AuthScope, page: PageRequest) -> Result<Page<AuditEntry>>;
}

pub trait MetricTypeRepository: Repository<MetricType, MetricTypeId, MetricTypeCreate> {}

pub struct MetricTypeCreate {
    pub name: String,
    pub entity_type: fulcrum_core::MetricEntityType,
}

pub trait MetricEntryRepository: Send + Sync {
    fn create(&self, entry: MetricEntry) -> Result<MetricEntry>;
    fn find_by_id(&self, id: MetricEntryId) -> Result<Option<MetricEntry>>;
    fn list_by_agent(&self, agent_id: AgentId, page: PageRequest) -> Result<Page<MetricEntry>>;
}
