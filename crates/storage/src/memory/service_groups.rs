// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::MemoryStore;
use crate::page::{Page, PageRequest};
use crate::repository::{Repository, ServiceGroupRepository};
use fulcrum_core::{
    AuthScope, Error, ParticipantId, Result, ServiceGroup, ServiceGroupFields, ServiceGroupId,
    ServiceGroupUpdate,
};

impl Repository<ServiceGroup, ServiceGroupId, ServiceGroupFields> for MemoryStore {
    fn create(&self, fields: ServiceGroupFields) -> Result<ServiceGroup> {
        let now = self.clock().now();
        let group = ServiceGroup::from_fields(fields, now);
        group.validate()?;
        self.with_inner(|inner| {
            inner.service_groups.insert(group.id(), group.clone());
        });
        Ok(group)
    }

    fn save(&self, entity: &ServiceGroup) -> Result<ServiceGroup> {
        entity.validate()?;
        self.with_inner(|inner| {
            inner.service_groups.insert(entity.id(), entity.clone());
        });
        Ok(entity.clone())
    }

    fn delete(&self, id: ServiceGroupId) -> Result<()> {
        self.with_inner(|inner| inner.service_groups.remove(&id));
        Ok(())
    }

    fn find_by_id(&self, id: ServiceGroupId) -> Result<Option<ServiceGroup>> {
        Ok(self.with_inner(|inner| inner.service_groups.get(&id).cloned()))
    }

    fn list(&self, scope: AuthScope, page: PageRequest) -> Result<Page<ServiceGroup>> {
        let items: Vec<ServiceGroup> = self.with_inner(|inner| {
            inner
                .service_groups
                .values()
                .filter(|g| scope.participant_id.is_none_or(|id| id == g.participant_id))
                .cloned()
                .collect()
        });
        let total = items.len() as u64;
        Ok(Page::new(items, page, total))
    }

    fn exists(&self, id: ServiceGroupId) -> Result<bool> {
        Ok(self.with_inner(|inner| inner.service_groups.contains_key(&id)))
    }
}

impl ServiceGroupRepository for MemoryStore {
    fn update(&self, id: ServiceGroupId, update: ServiceGroupUpdate) -> Result<ServiceGroup> {
        let mut group = self
            .find_by_id(id)?
            .ok_or_else(|| Error::not_found("service group", id))?;
        if let Some(name) = update.name {
            group.name = name;
        }
        let now = self.clock().now();
        group.base.touch(now);
        self.save(&group)
    }

    fn count_by_participant(&self, participant_id: ParticipantId) -> Result<u64> {
        Ok(self.with_inner(|inner| {
            inner
                .service_groups
                .values()
                .filter(|g| g.participant_id == participant_id)
                .count() as u64
        }))
    }

    fn delete_by_participant_id(&self, participant_id: ParticipantId) -> Result<u64> {
        Ok(self.with_inner(|inner| {
            let ids: Vec<ServiceGroupId> = inner
                .service_groups
                .values()
                .filter(|g| g.participant_id == participant_id)
                .map(|g| g.id())
                .collect();
            for id in &ids {
                inner.service_groups.remove(id);
            }
            ids.len() as u64
        }))
    }
}
