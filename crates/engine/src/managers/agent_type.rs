// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! AgentType Commander — an admin-curated global catalog (spec.md §3).

use crate::Engine;
use fulcrum_audit::EntityScope;
use fulcrum_auth::{Action, Identity, Subject};
use fulcrum_core::{AgentType, AgentTypeFields, AgentTypeId, AgentTypeUpdate, AuthScope, Error, Result};
use fulcrum_storage::{Page, PageRequest};

impl Engine {
    #[tracing::instrument(skip(self, identity, fields), fields(agent_type.name = %fields.name))]
    pub fn create_agent_type(&self, identity: &Identity, fields: AgentTypeFields) -> Result<AgentType> {
        self.authorize(identity, Subject::AgentType, Action::Create, AuthScope::empty())?;
        self.store.atomic(|tx| {
            let saved = tx.agent_types().create(fields)?;
            self.audit_create(identity, "AgentTypeCreated", saved.id(), EntityScope::default())?;
            Ok(saved)
        })
    }

    #[tracing::instrument(skip(self, identity), fields(entity_id = %id))]
    pub fn get_agent_type(&self, identity: &Identity, id: AgentTypeId) -> Result<AgentType> {
        self.authorize(identity, Subject::AgentType, Action::Read, AuthScope::empty())?;
        self.store
            .agent_types()
            .find_by_id(id)?
            .ok_or_else(|| Error::not_found("agent type", id))
    }

    #[tracing::instrument(skip(self, identity, page))]
    pub fn list_agent_types(&self, identity: &Identity, page: PageRequest) -> Result<Page<AgentType>> {
        self.authorize(identity, Subject::AgentType, Action::List, AuthScope::empty())?;
        self.store.agent_types().list(AuthScope::empty(), page)
    }

    #[tracing::instrument(skip(self, identity, update), fields(entity_id = %id))]
    pub fn update_agent_type(
        &self,
        identity: &Identity,
        id: AgentTypeId,
        update: AgentTypeUpdate,
    ) -> Result<AgentType> {
        self.authorize(identity, Subject::AgentType, Action::Update, AuthScope::empty())?;
        self.store.atomic(|tx| {
            let before = tx
                .agent_types()
                .find_by_id(id)?
                .ok_or_else(|| Error::not_found("agent type", id))?;
            let after = tx.agent_types().update(id, update)?;
            self.audit_update(
                identity,
                "AgentTypeUpdated",
                id,
                EntityScope::default(),
                &to_doc(&before),
                &to_doc(&after),
            )?;
            Ok(after)
        })
    }

    #[tracing::instrument(skip(self, identity), fields(entity_id = %id))]
    pub fn delete_agent_type(&self, identity: &Identity, id: AgentTypeId) -> Result<()> {
        self.authorize(identity, Subject::AgentType, Action::Delete, AuthScope::empty())?;
        self.store.atomic(|tx| {
            tx.agent_types()
                .find_by_id(id)?
                .ok_or_else(|| Error::not_found("agent type", id))?;
            tx.agent_types().delete(id)?;
            self.audit_create(identity, "AgentTypeDeleted", id, EntityScope::default())?;
            Ok(())
        })
    }
}

fn to_doc(agent_type: &AgentType) -> fulcrum_core::JsonDoc {
    fulcrum_core::JsonDoc::from(serde_json::json!({
        "name": agent_type.name,
        "supported_service_types": agent_type.supported_service_types,
    }))
}
