// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! [`MetricType`] / [`MetricEntry`] — typed metric admission (spec.md §3).

use crate::entities::base::BaseEntity;
use crate::error::Error;
use crate::id::{AgentId, MetricEntryId, MetricTypeId};
use crate::json::JsonDoc;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of entity a MetricType's values are about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricEntityType {
    Agent,
    Service,
    Resource,
}

crate::simple_display! {
    MetricEntityType {
        Agent => "agent",
        Service => "service",
        Resource => "resource",
    }
}

/// Catalog entry: a unique metric name and the entity type it's about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricType {
    pub base: BaseEntity<MetricTypeId>,
    pub name: String,
    pub entity_type: MetricEntityType,
}

impl MetricType {
    pub fn id(&self) -> MetricTypeId {
        self.base.id
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid("metric type name must not be empty"));
        }
        Ok(())
    }
}

/// An append-only metric reading, always scoped to the reporting Agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricEntry {
    pub base: BaseEntity<MetricEntryId>,
    pub metric_type_id: MetricTypeId,
    pub agent_id: AgentId,
    pub recorded_at: DateTime<Utc>,
    pub value: JsonDoc,
}

impl MetricEntry {
    pub fn id(&self) -> MetricEntryId {
        self.base.id
    }
}
