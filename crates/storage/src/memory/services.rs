// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::MemoryStore;
use crate::page::{Page, PageRequest};
use crate::repository::{Repository, ServiceRepository};
use fulcrum_core::{
    AgentId, AuthScope, Error, ParticipantId, Result, Service, ServiceFields, ServiceGroupId,
    ServiceId, ServiceState, ServiceUpdate,
};

impl Repository<Service, ServiceId, ServiceFields> for MemoryStore {
    fn create(&self, fields: ServiceFields) -> Result<Service> {
        let now = self.clock().now();
        let service = Service::from_fields(fields, now);
        service.validate()?;
        self.with_inner(|inner| {
            inner.services.insert(service.id(), service.clone());
        });
        Ok(service)
    }

    fn save(&self, entity: &Service) -> Result<Service> {
        entity.validate()?;
        self.with_inner(|inner| {
            inner.services.insert(entity.id(), entity.clone());
        });
        Ok(entity.clone())
    }

    fn delete(&self, id: ServiceId) -> Result<()> {
        self.with_inner(|inner| inner.services.remove(&id));
        Ok(())
    }

    fn find_by_id(&self, id: ServiceId) -> Result<Option<Service>> {
        Ok(self.with_inner(|inner| inner.services.get(&id).cloned()))
    }

    fn list(&self, scope: AuthScope, page: PageRequest) -> Result<Page<Service>> {
        let items: Vec<Service> = self.with_inner(|inner| {
            inner
                .services
                .values()
                .filter(|s| scope.provider_id.is_none_or(|id| id == s.provider_id))
                .filter(|s| scope.consumer_id.is_none_or(|id| id == s.consumer_id))
                .filter(|s| scope.agent_id.is_none_or(|id| id == s.agent_id))
                .cloned()
                .collect()
        });
        let total = items.len() as u64;
        Ok(Page::new(items, page, total))
    }

    fn exists(&self, id: ServiceId) -> Result<bool> {
        Ok(self.with_inner(|inner| inner.services.contains_key(&id)))
    }
}

impl ServiceRepository for MemoryStore {
    fn update(&self, id: ServiceId, update: ServiceUpdate) -> Result<Service> {
        let mut service = self
            .find_by_id(id)?
            .ok_or_else(|| Error::not_found("service", id))?;
        if let Some(name) = update.name {
            service.name = name;
        }
        if let Some(target_properties) = update.target_properties {
            service.target_properties = Some(target_properties);
        }
        let now = self.clock().now();
        service.base.touch(now);
        self.save(&service)
    }

    fn count_by_provider(&self, provider_id: ParticipantId) -> Result<u64> {
        Ok(self.with_inner(|inner| {
            inner
                .services
                .values()
                .filter(|s| s.provider_id == provider_id && s.current_state != ServiceState::Deleted)
                .count() as u64
        }))
    }

    fn count_by_consumer(&self, consumer_id: ParticipantId) -> Result<u64> {
        Ok(self.with_inner(|inner| {
            inner
                .services
                .values()
                .filter(|s| s.consumer_id == consumer_id && s.current_state != ServiceState::Deleted)
                .count() as u64
        }))
    }

    fn count_by_group(&self, group_id: ServiceGroupId) -> Result<u64> {
        Ok(self.with_inner(|inner| {
            inner
                .services
                .values()
                .filter(|s| s.group_id == group_id && s.current_state != ServiceState::Deleted)
                .count() as u64
        }))
    }

    fn count_by_agent(&self, agent_id: AgentId) -> Result<u64> {
        Ok(self.with_inner(|inner| {
            inner
                .services
                .values()
                .filter(|s| s.agent_id == agent_id && s.current_state != ServiceState::Deleted)
                .count() as u64
        }))
    }

    fn find_by_external_id(&self, agent_id: AgentId, external_id: &str) -> Result<Option<Service>> {
        Ok(self.with_inner(|inner| {
            inner
                .services
                .values()
                .find(|s| s.agent_id == agent_id && s.external_id.as_deref() == Some(external_id))
                .cloned()
        }))
    }

    fn delete_by_agent_id(&self, agent_id: AgentId) -> Result<u64> {
        Ok(self.with_inner(|inner| {
            let ids: Vec<ServiceId> = inner
                .services
                .values()
                .filter(|s| s.agent_id == agent_id)
                .map(|s| s.id())
                .collect();
            for id in &ids {
                inner.services.remove(id);
            }
            ids.len() as u64
        }))
    }
}
