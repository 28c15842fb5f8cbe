// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::MemoryStore;
use crate::page::{Page, PageRequest};
use crate::repository::{AgentTypeRepository, Repository};
use fulcrum_core::{
    AgentType, AgentTypeFields, AgentTypeId, AgentTypeUpdate, AuthScope, Error, Result,
};

impl Repository<AgentType, AgentTypeId, AgentTypeFields> for MemoryStore {
    fn create(&self, fields: AgentTypeFields) -> Result<AgentType> {
        let now = self.clock().now();
        let agent_type = AgentType::from_fields(fields, now);
        agent_type.validate()?;
        self.with_inner(|inner| {
            inner.agent_types.insert(agent_type.id(), agent_type.clone());
        });
        Ok(agent_type)
    }

    fn save(&self, entity: &AgentType) -> Result<AgentType> {
        entity.validate()?;
        self.with_inner(|inner| {
            inner.agent_types.insert(entity.id(), entity.clone());
        });
        Ok(entity.clone())
    }

    fn delete(&self, id: AgentTypeId) -> Result<()> {
        self.with_inner(|inner| inner.agent_types.remove(&id));
        Ok(())
    }

    fn find_by_id(&self, id: AgentTypeId) -> Result<Option<AgentType>> {
        Ok(self.with_inner(|inner| inner.agent_types.get(&id).cloned()))
    }

    fn list(&self, _scope: AuthScope, page: PageRequest) -> Result<Page<AgentType>> {
        let items: Vec<AgentType> =
            self.with_inner(|inner| inner.agent_types.values().cloned().collect());
        let total = items.len() as u64;
        Ok(Page::new(items, page, total))
    }

    fn exists(&self, id: AgentTypeId) -> Result<bool> {
        Ok(self.with_inner(|inner| inner.agent_types.contains_key(&id)))
    }
}

impl AgentTypeRepository for MemoryStore {
    fn update(&self, id: AgentTypeId, update: AgentTypeUpdate) -> Result<AgentType> {
        let mut agent_type = self
            .find_by_id(id)?
            .ok_or_else(|| Error::not_found("agent type", id))?;
        if let Some(name) = update.name {
            agent_type.name = name;
        }
        if let Some(supported) = update.supported_service_types {
            agent_type.supported_service_types = supported;
        }
        let now = self.clock().now();
        agent_type.base.touch(now);
        self.save(&agent_type)
    }
}
