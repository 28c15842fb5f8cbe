// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! [`ServiceGroup`] — a consumer-owned bundle of Services (spec.md §3).

use crate::entities::base::BaseEntity;
use crate::error::Error;
use crate::id::{ParticipantId, ServiceGroupId};
use crate::scope::AuthScope;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceGroup {
    pub base: BaseEntity<ServiceGroupId>,
    pub name: String,
    pub participant_id: ParticipantId,
}

impl ServiceGroup {
    pub fn id(&self) -> ServiceGroupId {
        self.base.id
    }

    pub fn from_fields(fields: ServiceGroupFields, now: chrono::DateTime<chrono::Utc>) -> Self {
        Self {
            base: BaseEntity::new(ServiceGroupId::new(), now),
            name: fields.name,
            participant_id: fields.participant_id,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid("service group name must not be empty"));
        }
        Ok(())
    }

    pub fn scope(&self) -> AuthScope {
        AuthScope::participant(self.participant_id)
    }
}

crate::builder! {
    pub struct ServiceGroupBuilder => ServiceGroupFields {
        into {
            name: String = "test-group",
        }
        set {
            participant_id: ParticipantId = ParticipantId::nil(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServiceGroupFields {
    pub name: String,
    pub participant_id: ParticipantId,
}

#[derive(Debug, Clone, Default)]
pub struct ServiceGroupUpdate {
    pub name: Option<String>,
}
