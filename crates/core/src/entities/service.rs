// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! [`Service`] — the central managed object (spec.md §3, §4.6).

use crate::entities::base::BaseEntity;
use crate::entities::participant::AttributeMap;
use crate::error::Error;
use crate::id::{AgentId, JobId, ParticipantId, ServiceGroupId, ServiceId, ServiceTypeId};
use crate::json::JsonDoc;
use crate::scope::AuthScope;
use serde::{Deserialize, Serialize};

/// A Service's current or target lifecycle state (spec.md §4.6).
///
/// Transient states end in `-ing`; `Created`/`Started`/`Stopped`/`Deleted`
/// are the stable states a Service can idle in between controller-driven
/// transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceState {
    Creating,
    Created,
    Starting,
    Started,
    Stopping,
    Stopped,
    HotUpdating,
    ColdUpdating,
    Deleting,
    Deleted,
}

crate::simple_display! {
    ServiceState {
        Creating => "creating",
        Created => "created",
        Starting => "starting",
        Started => "started",
        Stopping => "stopping",
        Stopped => "stopped",
        HotUpdating => "hot_updating",
        ColdUpdating => "cold_updating",
        Deleting => "deleting",
        Deleted => "deleted",
    }
}

impl ServiceState {
    /// Stable states are the only ones a Service can be asked to transition
    /// *from* via an external request; transient states are reached only by
    /// the controller itself and left only by a Job completion/failure.
    pub fn is_stable(&self) -> bool {
        matches!(
            self,
            ServiceState::Created
                | ServiceState::Started
                | ServiceState::Stopped
                | ServiceState::Deleted
        )
    }

    pub fn is_transient(&self) -> bool {
        !self.is_stable()
    }
}

/// The verb a Job dispatched for a Service represents (spec.md §3, §4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceAction {
    Create,
    Start,
    Stop,
    ColdUpdate,
    HotUpdate,
    Delete,
}

crate::simple_display! {
    ServiceAction {
        Create => "create",
        Start => "start",
        Stop => "stop",
        ColdUpdate => "cold_update",
        HotUpdate => "hot_update",
        Delete => "delete",
    }
}

/// The central managed object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub base: BaseEntity<ServiceId>,
    pub name: String,
    pub attributes: AttributeMap,
    pub current_state: ServiceState,
    pub target_state: Option<ServiceState>,
    pub current_properties: JsonDoc,
    pub target_properties: Option<JsonDoc>,
    /// Agent-chosen correlation key, unique per Agent.
    pub external_id: Option<String>,
    /// Opaque JSON the Agent uses as scratch/state.
    pub resources: JsonDoc,
    pub error_message: Option<String>,
    pub failed_action: Option<ServiceAction>,
    pub retry_count: u32,
    pub provider_id: ParticipantId,
    pub consumer_id: ParticipantId,
    pub group_id: ServiceGroupId,
    pub agent_id: AgentId,
    pub service_type_id: ServiceTypeId,
}

impl Service {
    pub fn id(&self) -> ServiceId {
        self.base.id
    }

    pub fn scope(&self) -> AuthScope {
        AuthScope::service(self.provider_id, self.consumer_id, self.agent_id)
    }

    /// Construct a Service from its full field set. Used by the storage
    /// layer for paths other than the initial creation request (which goes
    /// through [`Service::new_creating`] instead, since only that path fixes
    /// `current_state`/`target_state` to `Creating`/`Created`).
    pub fn from_fields(fields: ServiceFields, now: chrono::DateTime<chrono::Utc>) -> Self {
        Self {
            base: BaseEntity::new(ServiceId::new(), now),
            name: fields.name,
            attributes: fields.attributes,
            current_state: fields.current_state,
            target_state: fields.target_state,
            current_properties: fields.current_properties,
            target_properties: fields.target_properties,
            external_id: fields.external_id,
            resources: JsonDoc::null(),
            error_message: fields.error_message,
            failed_action: None,
            retry_count: fields.retry_count,
            provider_id: fields.provider_id,
            consumer_id: fields.consumer_id,
            group_id: fields.group_id,
            agent_id: fields.agent_id,
            service_type_id: fields.service_type_id,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid("service name must not be empty"));
        }
        for key in self.attributes.keys() {
            if key.trim().is_empty() {
                return Err(Error::invalid("attribute keys must not be empty"));
            }
        }
        Ok(())
    }

    /// A plain constructor for the initial Creating request — the only
    /// transition that starts from "no current state".
    pub fn new_creating(
        name: String,
        attributes: AttributeMap,
        target_properties: JsonDoc,
        provider_id: ParticipantId,
        consumer_id: ParticipantId,
        group_id: ServiceGroupId,
        agent_id: AgentId,
        service_type_id: ServiceTypeId,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Self {
        Self {
            base: BaseEntity::new(ServiceId::new(), now),
            name,
            attributes,
            current_state: ServiceState::Creating,
            target_state: Some(ServiceState::Created),
            current_properties: JsonDoc::null(),
            target_properties: Some(target_properties),
            external_id: None,
            resources: JsonDoc::null(),
            error_message: None,
            failed_action: None,
            retry_count: 0,
            provider_id,
            consumer_id,
            group_id,
            agent_id,
            service_type_id,
        }
    }
}

/// Partial-update input for [`Service`] (spec.md §6/§9).
///
/// `target_properties: Some(None)` is indistinguishable from "not supplied"
/// at the type level for a doubly-optional field, so the engine takes
/// `target_properties` as a plain `Option<JsonDoc>` meaning "propose this
/// as the new properties" and `name` as `Option<String>` meaning "rename".
/// A request with neither field set is a no-op.
#[derive(Debug, Clone, Default)]
pub struct ServiceUpdate {
    pub name: Option<String>,
    pub target_properties: Option<JsonDoc>,
}

/// Payload an Agent reports with `Job::Complete` (spec.md §4.6, §4.7).
#[derive(Debug, Clone, Default)]
pub struct JobCompletionPayload {
    pub resources: Option<JsonDoc>,
    pub external_id: Option<String>,
}

impl Service {
    /// Legal state transitions (spec.md §4.6). Returns the transient state
    /// and the Job action to dispatch, or `InvalidInput` for any other pair.
    pub fn legal_transition(
        from: ServiceState,
        to: ServiceState,
    ) -> Result<(ServiceState, ServiceAction), Error> {
        use ServiceAction::*;
        use ServiceState::*;
        match (from, to) {
            (Created, Started) => Ok((Starting, Start)),
            (Started, Stopped) => Ok((Stopping, Stop)),
            (Stopped, Started) => Ok((Starting, Start)),
            (Stopped, Deleted) => Ok((Deleting, Delete)),
            _ => Err(Error::invalid(format!(
                "illegal transition from {from} to {to}"
            ))),
        }
    }
}

crate::builder! {
    pub struct ServiceBuilder => ServiceFields {
        into {
            name: String = "test-service",
        }
        set {
            attributes: AttributeMap = AttributeMap::new(),
            current_state: ServiceState = ServiceState::Stopped,
            target_state: Option<ServiceState> = None,
            current_properties: JsonDoc = JsonDoc::null(),
            target_properties: Option<JsonDoc> = None,
            retry_count: u32 = 0,
            provider_id: ParticipantId = ParticipantId::nil(),
            consumer_id: ParticipantId = ParticipantId::nil(),
            group_id: ServiceGroupId = ServiceGroupId::nil(),
            agent_id: AgentId = AgentId::nil(),
            service_type_id: ServiceTypeId = ServiceTypeId::nil(),
        }
        option {
            external_id: String = None,
            error_message: String = None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServiceFields {
    pub name: String,
    pub attributes: AttributeMap,
    pub current_state: ServiceState,
    pub target_state: Option<ServiceState>,
    pub current_properties: JsonDoc,
    pub target_properties: Option<JsonDoc>,
    pub retry_count: u32,
    pub external_id: Option<String>,
    pub error_message: Option<String>,
    pub provider_id: ParticipantId,
    pub consumer_id: ParticipantId,
    pub group_id: ServiceGroupId,
    pub agent_id: AgentId,
    pub service_type_id: ServiceTypeId,
}
