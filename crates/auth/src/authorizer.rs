// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! RBAC rule table and `Authorize` (spec.md §4.2).

use crate::identity::Identity;
use fulcrum_core::{AuthScope, Error, Result, Role};
use std::collections::BTreeMap;

/// Entity kinds the rule table is indexed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Subject {
    Participant,
    Agent,
    AgentType,
    Service,
    ServiceType,
    ServiceGroup,
    Job,
    Token,
    MetricType,
    MetricEntry,
    AuditEntry,
}

/// CRUD plus domain verbs the rule table is indexed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    List,
    UpdateState,
    Start,
    Stop,
    Retry,
    Claim,
    Complete,
    Fail,
    ListPending,
    GenerateToken,
    Regenerate,
}

/// Immutable (Subject, Action) -> allowed Roles table, built once and read
/// many times (spec.md §5: "the Authorizer's rule table is built once and
/// read-only thereafter").
pub struct Authorizer {
    rules: BTreeMap<(Subject, Action), Vec<Role>>,
}

impl Default for Authorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Authorizer {
    pub fn new() -> Self {
        use Action::*;
        use Role::{Agent as AgentRole, FulcrumAdmin, Participant as ParticipantRole};
        use Subject::*;

        const ADMIN_ONLY: &[Role] = &[FulcrumAdmin];
        const ADMIN_PARTICIPANT: &[Role] = &[FulcrumAdmin, ParticipantRole];
        const ADMIN_PARTICIPANT_AGENT: &[Role] = &[FulcrumAdmin, ParticipantRole, AgentRole];
        const AGENT_ONLY: &[Role] = &[AgentRole];

        let mut rules = BTreeMap::new();
        let mut grant = |subject: Subject, action: Action, roles: &[Role]| {
            rules.insert((subject, action), roles.to_vec());
        };

        // Participant: tenant management is admin-only; a Participant may
        // read its own record.
        grant(Participant, Create, ADMIN_ONLY);
        grant(Participant, Update, ADMIN_ONLY);
        grant(Participant, Delete, ADMIN_ONLY);
        grant(Participant, Read, ADMIN_PARTICIPANT);
        grant(Participant, List, ADMIN_ONLY);

        // Agent (spec.md §4.2 table).
        grant(Agent, Create, ADMIN_PARTICIPANT);
        grant(Agent, Update, ADMIN_PARTICIPANT);
        grant(Agent, Delete, ADMIN_PARTICIPANT);
        grant(Agent, UpdateState, ADMIN_PARTICIPANT_AGENT);
        grant(Agent, Read, ADMIN_PARTICIPANT_AGENT);
        grant(Agent, List, ADMIN_PARTICIPANT);

        // AgentType / ServiceType: global catalogs, admin-curated, readable
        // by any authenticated role.
        for catalog in [AgentType, ServiceType] {
            grant(catalog, Create, ADMIN_ONLY);
            grant(catalog, Update, ADMIN_ONLY);
            grant(catalog, Delete, ADMIN_ONLY);
            grant(catalog, Read, ADMIN_PARTICIPANT_AGENT);
            grant(catalog, List, ADMIN_PARTICIPANT_AGENT);
        }

        // ServiceGroup: consumer-owned.
        grant(ServiceGroup, Create, ADMIN_PARTICIPANT);
        grant(ServiceGroup, Update, ADMIN_PARTICIPANT);
        grant(ServiceGroup, Delete, ADMIN_PARTICIPANT);
        grant(ServiceGroup, Read, ADMIN_PARTICIPANT);
        grant(ServiceGroup, List, ADMIN_PARTICIPANT);

        // Service (spec.md §4.2 table).
        grant(Service, Create, ADMIN_PARTICIPANT);
        grant(Service, Update, ADMIN_PARTICIPANT);
        grant(Service, Start, ADMIN_PARTICIPANT);
        grant(Service, Stop, ADMIN_PARTICIPANT);
        grant(Service, Delete, ADMIN_PARTICIPANT);
        grant(Service, Retry, ADMIN_PARTICIPANT);
        grant(Service, Read, ADMIN_PARTICIPANT_AGENT);
        grant(Service, List, ADMIN_PARTICIPANT_AGENT);

        // Job (spec.md §4.2 table: Claim/Complete/Fail/ListPending are
        // Agent-only — the Agent polling loop is the only caller).
        grant(Job, Claim, AGENT_ONLY);
        grant(Job, Complete, AGENT_ONLY);
        grant(Job, Fail, AGENT_ONLY);
        grant(Job, ListPending, AGENT_ONLY);
        grant(Job, Read, ADMIN_PARTICIPANT_AGENT);
        grant(Job, List, ADMIN_PARTICIPANT_AGENT);

        // Token (spec.md §4.2 table: GenerateToken).
        grant(Token, GenerateToken, ADMIN_PARTICIPANT);
        grant(Token, Regenerate, ADMIN_PARTICIPANT);
        grant(Token, Read, ADMIN_PARTICIPANT);
        grant(Token, List, ADMIN_PARTICIPANT);
        grant(Token, Delete, ADMIN_PARTICIPANT);

        // MetricType: admin-curated catalog.
        grant(MetricType, Create, ADMIN_ONLY);
        grant(MetricType, Update, ADMIN_ONLY);
        grant(MetricType, Delete, ADMIN_ONLY);
        grant(MetricType, Read, ADMIN_PARTICIPANT_AGENT);
        grant(MetricType, List, ADMIN_PARTICIPANT_AGENT);

        // MetricEntry (spec.md §4.2 table: Create is Agent-only).
        grant(MetricEntry, Create, AGENT_ONLY);
        grant(MetricEntry, Read, ADMIN_PARTICIPANT_AGENT);
        grant(MetricEntry, List, ADMIN_PARTICIPANT_AGENT);

        // AuditEntry: compliance record, never mutated through this table.
        grant(AuditEntry, Read, ADMIN_PARTICIPANT);
        grant(AuditEntry, List, ADMIN_PARTICIPANT);

        Self { rules }
    }

    /// `Authorize(identity, subject, action, scope)` (spec.md §4.2). Checks
    /// role permission first, then scope validation — an empty scope fails
    /// for any non-admin role, since there is nothing to validate against.
    pub fn authorize(
        &self,
        identity: &Identity,
        subject: Subject,
        action: Action,
        scope: AuthScope,
    ) -> Result<()> {
        let allowed = self.rules.get(&(subject, action)).ok_or_else(|| {
            Error::unauthorized(format!("no rule defined for {subject:?}/{action:?}"))
        })?;
        if !allowed.contains(&identity.role) {
            return Err(Error::unauthorized(format!(
                "role {} lacks {action:?} permission on {subject:?}",
                identity.role
            )));
        }
        if identity.role != Role::FulcrumAdmin && scope == AuthScope::empty() {
            return Err(Error::unauthorized("empty scope"));
        }
        if !identity.covers(&scope) {
            return Err(Error::unauthorized("scope mismatch"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fulcrum_core::{AgentId, ParticipantId};

    #[test]
    fn agent_may_claim_jobs_scoped_to_itself() {
        let authorizer = Authorizer::new();
        let agent_id = AgentId::new();
        let provider_id = ParticipantId::new();
        let identity = Identity::agent(agent_id, provider_id);
        let scope = AuthScope::agent(agent_id, provider_id);
        assert!(authorizer
            .authorize(&identity, Subject::Job, Action::Claim, scope)
            .is_ok());
    }

    #[test]
    fn participant_may_not_claim_jobs() {
        let authorizer = Authorizer::new();
        let participant_id = ParticipantId::new();
        let identity = Identity::participant(participant_id);
        let scope = AuthScope::participant(participant_id);
        let err = authorizer
            .authorize(&identity, Subject::Job, Action::Claim, scope)
            .unwrap_err();
        assert_eq!(err.kind(), fulcrum_core::ErrorKind::Unauthorized);
    }

    #[test]
    fn cross_tenant_scope_is_denied_even_when_role_permits() {
        let authorizer = Authorizer::new();
        let a = ParticipantId::new();
        let b = ParticipantId::new();
        let identity = Identity::participant(a);
        let err = authorizer
            .authorize(&identity, Subject::Service, Action::Read, AuthScope::participant(b))
            .unwrap_err();
        assert_eq!(err.kind(), fulcrum_core::ErrorKind::Unauthorized);
    }

    #[test]
    fn scope_monotonicity() {
        let authorizer = Authorizer::new();
        let participant_id = ParticipantId::new();
        let identity = Identity::participant(participant_id);
        let full_scope = AuthScope::participant(participant_id).with_consumer(participant_id);
        assert!(authorizer
            .authorize(&identity, Subject::Service, Action::Read, full_scope)
            .is_ok());
        let subset = AuthScope::participant(participant_id);
        assert!(subset.is_subset_of(&full_scope));
        assert!(authorizer
            .authorize(&identity, Subject::Service, Action::Read, subset)
            .is_ok());
    }
}
