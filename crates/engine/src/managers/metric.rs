// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! MetricType / MetricEntry Commanders (spec.md §3, §4.2).

use crate::Engine;
use fulcrum_audit::EntityScope;
use fulcrum_auth::{Action, Identity, Subject};
use fulcrum_core::{
    AgentId, AuthScope, Error, JsonDoc, MetricEntry, MetricEntryId, MetricType, MetricTypeId,
    Result,
};
use fulcrum_storage::{MetricTypeCreate, Page, PageRequest};

impl Engine {
    #[tracing::instrument(skip(self, identity, fields))]
    pub fn create_metric_type(
        &self,
        identity: &Identity,
        fields: MetricTypeCreate,
    ) -> Result<MetricType> {
        self.authorize(identity, Subject::MetricType, Action::Create, AuthScope::empty())?;
        self.store.atomic(|tx| {
            let saved = tx.metric_types().create(fields)?;
            self.audit_create(identity, "MetricTypeCreated", saved.id(), EntityScope::default())?;
            Ok(saved)
        })
    }

    #[tracing::instrument(skip(self, identity), fields(entity_id = %id))]
    pub fn get_metric_type(&self, identity: &Identity, id: MetricTypeId) -> Result<MetricType> {
        self.authorize(identity, Subject::MetricType, Action::Read, AuthScope::empty())?;
        self.store
            .metric_types()
            .find_by_id(id)?
            .ok_or_else(|| Error::not_found("metric type", id))
    }

    #[tracing::instrument(skip(self, identity, page))]
    pub fn list_metric_types(&self, identity: &Identity, page: PageRequest) -> Result<Page<MetricType>> {
        self.authorize(identity, Subject::MetricType, Action::List, AuthScope::empty())?;
        self.store.metric_types().list(AuthScope::empty(), page)
    }

    #[tracing::instrument(skip(self, identity), fields(entity_id = %id))]
    pub fn delete_metric_type(&self, identity: &Identity, id: MetricTypeId) -> Result<()> {
        self.authorize(identity, Subject::MetricType, Action::Delete, AuthScope::empty())?;
        self.store.atomic(|tx| {
            tx.metric_types()
                .find_by_id(id)?
                .ok_or_else(|| Error::not_found("metric type", id))?;
            tx.metric_types().delete(id)?;
            self.audit_create(identity, "MetricTypeDeleted", id, EntityScope::default())?;
            Ok(())
        })
    }

    /// Create is Agent-only (spec.md §4.2): only the reporting Agent submits
    /// its own readings.
    #[tracing::instrument(skip(self, identity, value), fields(entity_id = %agent_id))]
    pub fn create_metric_entry(
        &self,
        identity: &Identity,
        metric_type_id: MetricTypeId,
        agent_id: AgentId,
        value: JsonDoc,
    ) -> Result<MetricEntry> {
        let scope = AuthScope::agent(
            agent_id,
            identity.participant_id.unwrap_or_else(fulcrum_core::ParticipantId::nil),
        );
        self.authorize(identity, Subject::MetricEntry, Action::Create, scope)?;
        self.store.atomic(|tx| {
            let agent = tx
                .agents()
                .find_by_id(agent_id)?
                .ok_or_else(|| Error::not_found("agent", agent_id))?;
            if !tx.metric_types().exists(metric_type_id)? {
                return Err(Error::not_found("metric type", metric_type_id));
            }
            let entry = MetricEntry {
                base: fulcrum_core::BaseEntity::new(MetricEntryId::new(), tx.clock().now()),
                metric_type_id,
                agent_id,
                recorded_at: tx.clock().now(),
                value,
            };
            let saved = tx.metric_entries().create(entry)?;
            self.audit_create(
                identity,
                "MetricEntryCreated",
                saved.id(),
                EntityScope {
                    agent_id: Some(agent_id),
                    provider_id: Some(agent.provider_id),
                    ..Default::default()
                },
            )?;
            Ok(saved)
        })
    }

    #[tracing::instrument(skip(self, identity), fields(entity_id = %id))]
    pub fn get_metric_entry(&self, identity: &Identity, id: MetricEntryId) -> Result<MetricEntry> {
        let entry = self
            .store
            .metric_entries()
            .find_by_id(id)?
            .ok_or_else(|| Error::not_found("metric entry", id))?;
        let agent = self
            .store
            .agents()
            .find_by_id(entry.agent_id)?
            .ok_or_else(|| Error::not_found("agent", entry.agent_id))?;
        self.authorize(identity, Subject::MetricEntry, Action::Read, agent.scope())?;
        Ok(entry)
    }

    #[tracing::instrument(skip(self, identity, page), fields(entity_id = %agent_id))]
    pub fn list_metric_entries_for_agent(
        &self,
        identity: &Identity,
        agent_id: AgentId,
        page: PageRequest,
    ) -> Result<Page<MetricEntry>> {
        let agent = self
            .store
            .agents()
            .find_by_id(agent_id)?
            .ok_or_else(|| Error::not_found("agent", agent_id))?;
        self.authorize(identity, Subject::MetricEntry, Action::List, agent.scope())?;
        self.store.metric_entries().list_by_agent(agent_id, page)
    }
}
