// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fulcrum-core: shared domain types for the Fulcrum control plane.
//!
//! Every other crate in the workspace depends on this one for entity shapes,
//! identifiers, the error taxonomy, and the `Clock`/`AuthScope` abstractions
//! that keep the engine and storage layers decoupled from wall-clock time
//! and RBAC policy respectively.

pub mod clock;
pub mod entities;
pub mod error;
pub mod id;
pub mod json;
pub mod macros;
pub mod scope;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FixedClock, SystemClock};
pub use entities::{
    Agent, AgentFields, AgentState, AgentType, AgentTypeFields, AgentTypeUpdate, AgentUpdate,
    AttributeMap, AuditEntry, Authority, BaseEntity, EventType, Job, JobCompletionPayload,
    JobState, MetricEntityType, MetricEntry, MetricType, Participant, ParticipantFields,
    ParticipantStatus, ParticipantUpdate, Role, Service, ServiceAction, ServiceFields,
    ServiceGroup, ServiceGroupFields, ServiceGroupUpdate, ServiceState, ServiceType,
    ServiceTypeFields, ServiceTypeUpdate, ServiceUpdate, Token, DEFAULT_PRIORITY,
};
pub use error::{Error, ErrorKind, Result};
pub use id::{
    parse_uuid, AgentId, AgentTypeId, AuditEntryId, JobId, MetricEntryId, MetricTypeId,
    ParticipantId, ServiceGroupId, ServiceId, ServiceTypeId, TokenId,
};
pub use json::JsonDoc;
pub use scope::AuthScope;

#[cfg(any(test, feature = "test-support"))]
pub use entities::{
    AgentBuilder, AgentTypeBuilder, JobBuilder, ParticipantBuilder, ServiceBuilder,
    ServiceGroupBuilder, ServiceTypeBuilder,
};
