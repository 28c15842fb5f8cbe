// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::MemoryStore;
use crate::page::{Page, PageRequest};
use crate::repository::{Repository, ServiceTypeRepository};
use fulcrum_core::{
    AuthScope, Error, Result, ServiceType, ServiceTypeFields, ServiceTypeId, ServiceTypeUpdate,
};

impl Repository<ServiceType, ServiceTypeId, ServiceTypeFields> for MemoryStore {
    fn create(&self, fields: ServiceTypeFields) -> Result<ServiceType> {
        let now = self.clock().now();
        let service_type = ServiceType::from_fields(fields, now);
        service_type.validate()?;
        self.with_inner(|inner| {
            inner
                .service_types
                .insert(service_type.id(), service_type.clone());
        });
        Ok(service_type)
    }

    fn save(&self, entity: &ServiceType) -> Result<ServiceType> {
        entity.validate()?;
        self.with_inner(|inner| {
            inner.service_types.insert(entity.id(), entity.clone());
        });
        Ok(entity.clone())
    }

    fn delete(&self, id: ServiceTypeId) -> Result<()> {
        self.with_inner(|inner| inner.service_types.remove(&id));
        Ok(())
    }

    fn find_by_id(&self, id: ServiceTypeId) -> Result<Option<ServiceType>> {
        Ok(self.with_inner(|inner| inner.service_types.get(&id).cloned()))
    }

    fn list(&self, _scope: AuthScope, page: PageRequest) -> Result<Page<ServiceType>> {
        let items: Vec<ServiceType> =
            self.with_inner(|inner| inner.service_types.values().cloned().collect());
        let total = items.len() as u64;
        Ok(Page::new(items, page, total))
    }

    fn exists(&self, id: ServiceTypeId) -> Result<bool> {
        Ok(self.with_inner(|inner| inner.service_types.contains_key(&id)))
    }
}

impl ServiceTypeRepository for MemoryStore {
    fn update(&self, id: ServiceTypeId, update: ServiceTypeUpdate) -> Result<ServiceType> {
        let mut service_type = self
            .find_by_id(id)?
            .ok_or_else(|| Error::not_found("service type", id))?;
        if let Some(name) = update.name {
            service_type.name = name;
        }
        let now = self.clock().now();
        service_type.base.touch(now);
        self.save(&service_type)
    }
}
