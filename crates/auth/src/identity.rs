// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! [`Identity`] — the caller behind a verified bearer token (spec.md §4.1).

use fulcrum_core::{AgentId, AuthScope, ParticipantId, Role};

/// The resolved identity of a caller: a role plus the scope pointers that
/// role carries. Never constructed directly from request input — only from
/// a verified [`crate::token`] lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub role: Role,
    pub participant_id: Option<ParticipantId>,
    pub agent_id: Option<AgentId>,
}

impl Identity {
    pub fn admin() -> Self {
        Self {
            role: Role::FulcrumAdmin,
            participant_id: None,
            agent_id: None,
        }
    }

    pub fn participant(participant_id: ParticipantId) -> Self {
        Self {
            role: Role::Participant,
            participant_id: Some(participant_id),
            agent_id: None,
        }
    }

    pub fn agent(agent_id: AgentId, provider_id: ParticipantId) -> Self {
        Self {
            role: Role::Agent,
            participant_id: Some(provider_id),
            agent_id: Some(agent_id),
        }
    }

    /// Scope validation (spec.md §4.1), applied after role permission
    /// passes. `Authorizer::authorize` is the only caller of this — it
    /// additionally rejects an empty scope before reaching here.
    pub fn covers(&self, scope: &AuthScope) -> bool {
        let matches = |pointer: Option<ParticipantId>, expected: Option<ParticipantId>| {
            pointer.is_none_or(|id| Some(id) == expected)
        };
        match self.role {
            Role::FulcrumAdmin => true,
            Role::Participant => {
                matches(scope.participant_id, self.participant_id)
                    && matches(scope.provider_id, self.participant_id)
                    && matches(scope.consumer_id, self.participant_id)
            }
            Role::Agent => {
                scope.agent_id.is_none_or(|id| Some(id) == self.agent_id)
                    && matches(scope.participant_id, self.participant_id)
                    && matches(scope.provider_id, self.participant_id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fulcrum_core::ParticipantId;

    #[test]
    fn admin_covers_any_scope() {
        let admin = Identity::admin();
        assert!(admin.covers(&AuthScope::participant(ParticipantId::new())));
    }

    #[test]
    fn participant_rejects_foreign_participant_pointer() {
        let mine = ParticipantId::new();
        let theirs = ParticipantId::new();
        let identity = Identity::participant(mine);
        assert!(identity.covers(&AuthScope::participant(mine)));
        assert!(!identity.covers(&AuthScope::participant(theirs)));
    }

    #[test]
    fn participant_ignores_agent_pointer() {
        let identity = Identity::participant(ParticipantId::new());
        let scope = AuthScope {
            agent_id: Some(fulcrum_core::AgentId::new()),
            ..AuthScope::empty()
        };
        assert!(identity.covers(&scope));
    }

    #[test]
    fn agent_rejects_foreign_agent_pointer() {
        let provider = ParticipantId::new();
        let identity = Identity::agent(fulcrum_core::AgentId::new(), provider);
        let scope = AuthScope {
            agent_id: Some(fulcrum_core::AgentId::new()),
            ..AuthScope::empty()
        };
        assert!(!identity.covers(&scope));
    }
}
