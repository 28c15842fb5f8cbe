// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! [`AgentType`] — catalog entry naming a class of Agent (spec.md §3).

use crate::entities::base::BaseEntity;
use crate::error::Error;
use crate::id::{AgentTypeId, ServiceTypeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Catalog entry naming a class of Agent and the ServiceTypes it supports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentType {
    pub base: BaseEntity<AgentTypeId>,
    pub name: String,
    pub supported_service_types: BTreeSet<ServiceTypeId>,
}

impl AgentType {
    pub fn id(&self) -> AgentTypeId {
        self.base.id
    }

    pub fn from_fields(fields: AgentTypeFields, now: chrono::DateTime<chrono::Utc>) -> Self {
        Self {
            base: BaseEntity::new(AgentTypeId::new(), now),
            name: fields.name,
            supported_service_types: fields.supported_service_types,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid("agent type name must not be empty"));
        }
        Ok(())
    }

    pub fn supports(&self, service_type: ServiceTypeId) -> bool {
        self.supported_service_types.contains(&service_type)
    }
}

crate::builder! {
    pub struct AgentTypeBuilder => AgentTypeFields {
        into {
            name: String = "test-agent-type",
        }
        set {
            supported_service_types: BTreeSet<ServiceTypeId> = BTreeSet::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AgentTypeFields {
    pub name: String,
    pub supported_service_types: BTreeSet<ServiceTypeId>,
}

#[derive(Debug, Clone, Default)]
pub struct AgentTypeUpdate {
    pub name: Option<String>,
    pub supported_service_types: Option<BTreeSet<ServiceTypeId>>,
}
