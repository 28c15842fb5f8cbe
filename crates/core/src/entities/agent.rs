// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! [`Agent`] — a worker owned by a provider Participant (spec.md §3).

use crate::entities::base::BaseEntity;
use crate::entities::participant::AttributeMap;
use crate::error::Error;
use crate::id::{AgentId, AgentTypeId, ParticipantId};
use crate::scope::AuthScope;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of an Agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentState {
    New,
    Connected,
    Disconnected,
    Error,
    Disabled,
}

crate::simple_display! {
    AgentState {
        New => "new",
        Connected => "connected",
        Disconnected => "disconnected",
        Error => "error",
        Disabled => "disabled",
    }
}

/// A worker process owned by a provider Participant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub base: BaseEntity<AgentId>,
    pub name: String,
    pub country: String,
    pub attributes: AttributeMap,
    pub provider_id: ParticipantId,
    pub agent_type_id: AgentTypeId,
    pub state: AgentState,
    pub last_state_update: DateTime<Utc>,
}

impl Agent {
    pub fn id(&self) -> AgentId {
        self.base.id
    }

    pub fn from_fields(fields: AgentFields, now: DateTime<Utc>) -> Self {
        Self {
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

    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid("agent name must not be empty"));
        }
        for key in self.attributes.keys() {
            if key.trim().is_empty() {
                return Err(Error::invalid("attribute keys must not be empty"));
            }
        }
        Ok(())
    }

    /// Scope pointer set used by the Authorizer: a Participant may act on an
    /// Agent it owns; an Agent identity may act on itself.
    pub fn scope(&self) -> AuthScope {
        AuthScope::agent(self.id(), self.provider_id)
    }

    pub fn set_state(&mut self, state: AgentState, now: DateTime<Utc>) {
        self.state = state;
        self.last_state_update = now;
        self.base.touch(now);
    }
}

crate::builder! {
    pub struct AgentBuilder => AgentFields {
        into {
            name: String = "test-agent",
            country: String = "",
        }
        set {
            attributes: AttributeMap = AttributeMap::new(),
            state: AgentState = AgentState::New,
            provider_id: ParticipantId = ParticipantId::nil(),
            agent_type_id: AgentTypeId = AgentTypeId::nil(),
        }
    }
}

/// Fields needed to create an Agent, before the repository assigns an id
/// and timestamps. `provider_id`/`agent_type_id` default to the nil id in
/// the test builder; production callers always set them explicitly.
#[derive(Debug, Clone)]
pub struct AgentFields {
    pub name: String,
    pub country: String,
    pub attributes: AttributeMap,
    pub state: AgentState,
    pub provider_id: ParticipantId,
    pub agent_type_id: AgentTypeId,
}

#[derive(Debug, Clone, Default)]
pub struct AgentUpdate {
    pub name: Option<String>,
    pub country: Option<String>,
    pub attributes: Option<AttributeMap>,
}
