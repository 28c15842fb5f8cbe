// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! [`AuditEntry`] — immutable audit record (spec.md §3, §4.5).

use crate::id::{AgentId, AuditEntryId, ParticipantId};
use crate::json::JsonDoc;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who caused an audited mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Authority {
    Admin,
    Participant,
    Agent,
    Internal,
}

crate::simple_display! {
    Authority {
        Admin => "admin",
        Participant => "participant",
        Agent => "agent",
        Internal => "internal",
    }
}

/// One event type per mutation kind, e.g. `ServiceCreated`, `JobCompleted`.
/// Kept as a plain string (rather than a closed enum) so new Commanders can
/// introduce event types without every audit consumer needing a match arm —
/// the audit log is an append-only record, not a dispatch key.
pub type EventType = String;

/// Immutable audit record. Never updated or deleted through the external
/// interface (spec.md §3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: AuditEntryId,
    pub created_at: DateTime<Utc>,
    pub authority: Authority,
    pub authority_id: Option<String>,
    pub event_type: EventType,
    /// Free-form properties; carries a `diff` key for update events.
    pub properties: JsonDoc,
    pub participant_id: Option<ParticipantId>,
    pub provider_id: Option<ParticipantId>,
    pub agent_id: Option<AgentId>,
    pub consumer_id: Option<ParticipantId>,
}
