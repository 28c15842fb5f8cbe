// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! [`ServiceType`] — catalog entry naming a class of Service (spec.md §3).

use crate::entities::base::BaseEntity;
use crate::error::Error;
use crate::id::ServiceTypeId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceType {
    pub base: BaseEntity<ServiceTypeId>,
    pub name: String,
}

impl ServiceType {
    pub fn id(&self) -> ServiceTypeId {
        self.base.id
    }

    pub fn from_fields(fields: ServiceTypeFields, now: chrono::DateTime<chrono::Utc>) -> Self {
        Self {
            base: BaseEntity::new(ServiceTypeId::new(), now),
            name: fields.name,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid("service type name must not be empty"));
        }
        Ok(())
    }
}

crate::builder! {
    pub struct ServiceTypeBuilder => ServiceTypeFields {
        into {
            name: String = "test-service-type",
        }
        set {}
    }
}

#[derive(Debug, Clone)]
pub struct ServiceTypeFields {
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct ServiceTypeUpdate {
    pub name: Option<String>,
}
