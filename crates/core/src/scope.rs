// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! [`AuthScope`] — the set of tenant/agent pointers a call touches.
//!
//! Defined in `core` (rather than `auth`) because every entity needs to be
//! able to produce its own scope; `auth::Authorizer` consumes it without
//! `core` needing to know anything about roles or identities.

use crate::id::{AgentId, ParticipantId};

/// Optional tenant/agent pointers describing which entities a call touches.
///
/// Per spec.md §9's Open Question, this workspace follows the
/// Participant-unified model: a single `participant_id` field plus
/// `provider_id`/`consumer_id` (both also Participant ids, just in a
/// provider/consumer role) and `agent_id`. No `BrokerID` or separate
/// provider-role type exists anywhere in this codebase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthScope {
    pub participant_id: Option<ParticipantId>,
    pub agent_id: Option<AgentId>,
    pub provider_id: Option<ParticipantId>,
    pub consumer_id: Option<ParticipantId>,
}

impl AuthScope {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn participant(id: ParticipantId) -> Self {
        Self {
            participant_id: Some(id),
            ..Self::default()
        }
    }

    pub fn agent(id: AgentId, provider_id: ParticipantId) -> Self {
        Self {
            agent_id: Some(id),
            provider_id: Some(provider_id),
            ..Self::default()
        }
    }

    pub fn service(provider_id: ParticipantId, consumer_id: ParticipantId, agent_id: AgentId) -> Self {
        Self {
            participant_id: None,
            agent_id: Some(agent_id),
            provider_id: Some(provider_id),
            consumer_id: Some(consumer_id),
        }
    }

    pub fn with_provider(mut self, provider_id: ParticipantId) -> Self {
        self.provider_id = Some(provider_id);
        self
    }

    pub fn with_consumer(mut self, consumer_id: ParticipantId) -> Self {
        self.consumer_id = Some(consumer_id);
        self
    }

    pub fn with_agent(mut self, agent_id: AgentId) -> Self {
        self.agent_id = Some(agent_id);
        self
    }

    /// True if every pointer set in `self` is also set (to the same value)
    /// in `superset` — used by the scope-monotonicity property (spec.md §8):
    /// if `Authorize(i, subj, act, s)` succeeds then it succeeds for any
    /// scope that is a "subset" of `s` in this sense.
    pub fn is_subset_of(&self, superset: &AuthScope) -> bool {
        fn covers<T: PartialEq>(sub: Option<T>, sup: Option<T>) -> bool {
            match sub {
                None => true,
                Some(v) => sup == Some(v),
            }
        }
        covers(self.participant_id, superset.participant_id)
            && covers(self.agent_id, superset.agent_id)
            && covers(self.provider_id, superset.provider_id)
            && covers(self.consumer_id, superset.consumer_id)
    }
}
