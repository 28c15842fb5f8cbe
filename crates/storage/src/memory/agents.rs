// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::MemoryStore;
use crate::page::{Page, PageRequest};
use crate::repository::{AgentRepository, Repository};
use chrono::{DateTime, Duration, Utc};
use fulcrum_core::{Agent, AgentFields, AgentId, AgentState, AgentUpdate, AuthScope, Error, ParticipantId, Result};

impl Repository<Agent, AgentId, AgentFields> for MemoryStore {
    fn create(&self, fields: AgentFields) -> Result<Agent> {
        let now = self.clock().now();
        let agent = Agent::from_fields(fields, now);
        agent.validate()?;
        self.with_inner(|inner| {
            inner.agents.insert(agent.id(), agent.clone());
        });
        Ok(agent)
    }

    fn save(&self, entity: &Agent) -> Result<Agent> {
        entity.validate()?;
        self.with_inner(|inner| {
            inner.agents.insert(entity.id(), entity.clone());
        });
        Ok(entity.clone())
    }

    fn delete(&self, id: AgentId) -> Result<()> {
        self.with_inner(|inner| inner.agents.remove(&id));
        Ok(())
    }

    fn find_by_id(&self, id: AgentId) -> Result<Option<Agent>> {
        Ok(self.with_inner(|inner| inner.agents.get(&id).cloned()))
    }

    fn list(&self, scope: AuthScope, page: PageRequest) -> Result<Page<Agent>> {
        let items: Vec<Agent> = self.with_inner(|inner| {
            inner
                .agents
                .values()
                .filter(|a| scope.provider_id.is_none_or(|id| id == a.provider_id))
                .filter(|a| scope.agent_id.is_none_or(|id| id == a.id()))
                .cloned()
                .collect()
        });
        let total = items.len() as u64;
        Ok(Page::new(items, page, total))
    }

    fn exists(&self, id: AgentId) -> Result<bool> {
        Ok(self.with_inner(|inner| inner.agents.contains_key(&id)))
    }
}

impl AgentRepository for MemoryStore {
    fn update(&self, id: AgentId, update: AgentUpdate, now: DateTime<Utc>) -> Result<Agent> {
        let mut agent = self
            .find_by_id(id)?
            .ok_or_else(|| Error::not_found("agent", id))?;
        if let Some(name) = update.name {
            agent.name = name;
        }
        if let Some(country) = update.country {
            agent.country = country;
        }
        if let Some(attributes) = update.attributes {
            agent.attributes = attributes;
        }
        agent.base.touch(now);
        self.save(&agent)
    }

    fn count_by_provider(&self, provider_id: ParticipantId) -> Result<u64> {
        Ok(self.with_inner(|inner| {
            inner
                .agents
                .values()
                .filter(|a| a.provider_id == provider_id)
                .count() as u64
        }))
    }

    fn mark_inactive_as_disconnected(&self, threshold: Duration, now: DateTime<Utc>) -> Result<u64> {
        let cutoff = now - threshold;
        Ok(self.with_inner(|inner| {
            let mut count = 0u64;
            for agent in inner.agents.values_mut() {
                if agent.state == AgentState::Connected && agent.last_state_update < cutoff {
                    agent.set_state(AgentState::Disconnected, now);
                    count += 1;
                }
            }
            count
        }))
    }

    fn delete_by_participant_id(&self, participant_id: ParticipantId) -> Result<u64> {
        Ok(self.with_inner(|inner| {
            let ids: Vec<AgentId> = inner
                .agents
                .values()
                .filter(|a| a.provider_id == participant_id)
                .map(|a| a.id())
                .collect();
            for id in &ids {
                inner.agents.remove(id);
            }
            ids.len() as u64
        }))
    }
}
