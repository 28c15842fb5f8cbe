// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! The `builder!`-generated builders produce `XFields` creation DTOs, the
//! same shape a Commander's `Create` method takes — they don't know about
//! ids or timestamps, which only a repository assigns. These factory
//! functions close that gap for tests that need a fully formed entity
//! without going through a `Store`.

use crate::clock::{Clock, FixedClock};
use crate::entities::*;
use crate::id::{AgentId, AgentTypeId, ParticipantId, ServiceGroupId, ServiceId, ServiceTypeId};
use crate::json::JsonDoc;
use chrono::{DateTime, Utc};

fn now_from(clock: Option<&dyn Clock>) -> DateTime<Utc> {
    clock.map(Clock::now).unwrap_or_else(|| FixedClock::default().now())
}

pub fn participant(fields: ParticipantFields) -> Participant {
    let now = now_from(None);
    Participant {
        base: BaseEntity::new(ParticipantId::new(), now),
        name: fields.name,
        country: fields.country,
        attributes: fields.attributes,
        status: fields.status,
    }
}

pub fn agent_type(fields: AgentTypeFields) -> AgentType {
    let now = now_from(None);
    AgentType {
        base: BaseEntity::new(AgentTypeId::new(), now),
        name: fields.name,
        supported_service_types: fields.supported_service_types,
    }
}

pub fn agent(fields: AgentFields) -> Agent {
    let now = now_from(None);
    Agent {
        base: BaseEntity::new(AgentId::new(), now),
        name: fields.name,
        country: fields.country,
        attributes: fields.attributes,
        provider_id: fields.provider_id,
        agent_type_id: fields.agent_type_id,
        state: fields.state,
        last_state_update: now,
    }
}

pub fn service_group(fields: ServiceGroupFields) -> ServiceGroup {
    let now = now_from(None);
    ServiceGroup {
        base: BaseEntity::new(ServiceGroupId::new(), now),
        name: fields.name,
        participant_id: fields.participant_id,
    }
}

pub fn service_type(fields: ServiceTypeFields) -> ServiceType {
    let now = now_from(None);
    ServiceType {
        base: BaseEntity::new(ServiceTypeId::new(), now),
        name: fields.name,
    }
}

pub fn service(fields: ServiceFields) -> Service {
    let now = now_from(None);
    Service {
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

/// Proptest strategies for core state machine types.
pub mod strategies {
    use crate::entities::ServiceState;
    use proptest::prelude::*;

    pub fn arb_service_state() -> impl Strategy<Value = ServiceState> {
        prop_oneof![
            Just(ServiceState::Creating),
            Just(ServiceState::Created),
            Just(ServiceState::Starting),
            Just(ServiceState::Started),
            Just(ServiceState::Stopping),
            Just(ServiceState::Stopped),
            Just(ServiceState::HotUpdating),
            Just(ServiceState::ColdUpdating),
            Just(ServiceState::Deleting),
            Just(ServiceState::Deleted),
        ]
    }

    pub fn arb_stable_service_state() -> impl Strategy<Value = ServiceState> {
        prop_oneof![
            Just(ServiceState::Created),
            Just(ServiceState::Started),
            Just(ServiceState::Stopped),
            Just(ServiceState::Deleted),
        ]
    }
}
