// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent Commander (spec.md §3, §4.2, §4.5, §4.8).

use crate::Engine;
use fulcrum_audit::EntityScope;
use fulcrum_auth::{Action, Identity, Subject};
use fulcrum_core::{Agent, AgentFields, AgentId, AgentUpdate, AuthScope, Error, Result};
use fulcrum_storage::{Page, PageRequest};

impl Engine {
    #[tracing::instrument(skip(self, identity, fields), fields(agent.name = %fields.name))]
    pub fn create_agent(&self, identity: &Identity, fields: AgentFields) -> Result<Agent> {
        let scope = AuthScope::participant(fields.provider_id);
        self.authorize(identity, Subject::Agent, Action::Create, scope)?;
        self.store.atomic(|tx| {
            tx.participants()
                .find_by_id(fields.provider_id)?
                .ok_or_else(|| Error::not_found("participant", fields.provider_id))?;
            if !tx.agent_types().exists(fields.agent_type_id)? {
                return Err(Error::not_found("agent type", fields.agent_type_id));
            }
            let saved = tx.agents().create(fields)?;
            self.audit_create(
                identity,
                "AgentCreated",
                saved.id(),
                EntityScope::from(saved.scope()),
            )?;
            Ok(saved)
        })
    }

    #[tracing::instrument(skip(self, identity), fields(entity_id = %id))]
    pub fn get_agent(&self, identity: &Identity, id: AgentId) -> Result<Agent> {
        let agent = self
            .store
            .agents()
            .find_by_id(id)?
            .ok_or_else(|| Error::not_found("agent", id))?;
        self.authorize(identity, Subject::Agent, Action::Read, agent.scope())?;
        Ok(agent)
    }

    #[tracing::instrument(skip(self, identity, scope, page))]
    pub fn list_agents(
        &self,
        identity: &Identity,
        scope: AuthScope,
        page: PageRequest,
    ) -> Result<Page<Agent>> {
        self.authorize(identity, Subject::Agent, Action::List, scope)?;
        self.store.agents().list(scope, page)
    }

    #[tracing::instrument(skip(self, identity, update), fields(entity_id = %id))]
    pub fn update_agent(&self, identity: &Identity, id: AgentId, update: AgentUpdate) -> Result<Agent> {
        let before = self
            .store
            .agents()
            .find_by_id(id)?
            .ok_or_else(|| Error::not_found("agent", id))?;
        self.authorize(identity, Subject::Agent, Action::Update, before.scope())?;
        self.store.atomic(|tx| {
            let now = tx.clock().now();
            let after = tx.agents().update(id, update, now)?;
            self.audit_update(
                identity,
                "AgentUpdated",
                id,
                EntityScope::from(after.scope()),
                &to_doc(&before),
                &to_doc(&after),
            )?;
            Ok(after)
        })
    }

    /// `UpdateState` has its own rule-table row since an Agent may update its
    /// own state (spec.md §4.2).
    #[tracing::instrument(skip(self, identity), fields(entity_id = %id, agent.state = ?state))]
    pub fn update_agent_state(
        &self,
        identity: &Identity,
        id: AgentId,
        state: fulcrum_core::AgentState,
    ) -> Result<Agent> {
        let before = self
            .store
            .agents()
            .find_by_id(id)?
            .ok_or_else(|| Error::not_found("agent", id))?;
        self.authorize(identity, Subject::Agent, Action::UpdateState, before.scope())?;
        self.store.atomic(|tx| {
            let now = tx.clock().now();
            let mut after = before.clone();
            after.set_state(state, now);
            let after = tx.agents().save(&after)?;
            self.audit_update(
                identity,
                "AgentStateUpdated",
                id,
                EntityScope::from(after.scope()),
                &to_doc(&before),
                &to_doc(&after),
            )?;
            Ok(after)
        })
    }

    /// Delete requires zero owned Services (spec.md §3) and transitively
    /// deletes the Agent's Tokens (spec.md §4).
    #[tracing::instrument(skip(self, identity), fields(entity_id = %id))]
    pub fn delete_agent(&self, identity: &Identity, id: AgentId) -> Result<()> {
        let agent = self
            .store
            .agents()
            .find_by_id(id)?
            .ok_or_else(|| Error::not_found("agent", id))?;
        self.authorize(identity, Subject::Agent, Action::Delete, agent.scope())?;
        self.store.atomic(|tx| {
            if tx.services().count_by_agent(id)? > 0 {
                return Err(Error::conflict("cannot delete agent with associated services"));
            }
            tx.agents().delete(id)?;
            tx.tokens().delete_by_agent_id(id)?;
            self.audit_create(identity, "AgentDeleted", id, EntityScope::from(agent.scope()))?;
            Ok(())
        })
    }
}

fn to_doc(agent: &Agent) -> fulcrum_core::JsonDoc {
    fulcrum_core::JsonDoc::from(serde_json::json!({
        "name": agent.name,
        "country": agent.country,
        "state": agent.state,
    }))
}
