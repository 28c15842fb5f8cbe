// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! [`Token`] — bearer credential (spec.md §3, §4.3).

use crate::entities::base::BaseEntity;
use crate::id::{AgentId, ParticipantId, TokenId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The role a Token (and the identity it authenticates) acts as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    FulcrumAdmin,
    Participant,
    Agent,
}

crate::simple_display! {
    Role {
        FulcrumAdmin => "fulcrum_admin",
        Participant => "participant",
        Agent => "agent",
    }
}

/// A bearer credential. The plaintext value is never stored — only its
/// SHA-256 hash (spec.md §4.3) — and is returned to the caller exactly once,
/// at creation or regeneration time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub base: BaseEntity<TokenId>,
    pub name: String,
    pub role: Role,
    /// Base64-encoded SHA-256 of the plaintext value.
    pub hashed_value: String,
    pub expires_at: DateTime<Utc>,
    pub participant_id: Option<ParticipantId>,
    pub agent_id: Option<AgentId>,
}

impl Token {
    pub fn id(&self) -> TokenId {
        self.base.id
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Invariant check for spec.md §3: FulcrumAdmin tokens carry no scope
    /// pointers; Participant tokens carry exactly `participant_id`; Agent
    /// tokens carry both `agent_id` and `participant_id` (the Agent's
    /// provider).
    pub fn scope_matches_role(&self) -> bool {
        match self.role {
            Role::FulcrumAdmin => self.participant_id.is_none() && self.agent_id.is_none(),
            Role::Participant => self.participant_id.is_some() && self.agent_id.is_none(),
            Role::Agent => self.participant_id.is_some() && self.agent_id.is_some(),
        }
    }
}
