// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::MemoryStore;
use crate::page::{Page, PageRequest};
use crate::repository::{MetricTypeCreate, MetricTypeRepository, Repository};
use fulcrum_core::{AuthScope, BaseEntity, MetricType, MetricTypeId, Result};

impl Repository<MetricType, MetricTypeId, MetricTypeCreate> for MemoryStore {
    fn create(&self, fields: MetricTypeCreate) -> Result<MetricType> {
        let now = self.clock().now();
        let metric_type = MetricType {
            base: BaseEntity::new(MetricTypeId::new(), now),
            name: fields.name,
            entity_type: fields.entity_type,
        };
        metric_type.validate()?;
        self.with_inner(|inner| {
            inner.metric_types.insert(metric_type.id(), metric_type.clone());
        });
        Ok(metric_type)
    }

    fn save(&self, entity: &MetricType) -> Result<MetricType> {
        entity.validate()?;
        self.with_inner(|inner| {
            inner.metric_types.insert(entity.id(), entity.clone());
        });
        Ok(entity.clone())
    }

    fn delete(&self, id: MetricTypeId) -> Result<()> {
        self.with_inner(|inner| inner.metric_types.remove(&id));
        Ok(())
    }

    fn find_by_id(&self, id: MetricTypeId) -> Result<Option<MetricType>> {
        Ok(self.with_inner(|inner| inner.metric_types.get(&id).cloned()))
    }

    fn list(&self, _scope: AuthScope, page: PageRequest) -> Result<Page<MetricType>> {
        let items: Vec<MetricType> =
            self.with_inner(|inner| inner.metric_types.values().cloned().collect());
        let total = items.len() as u64;
        Ok(Page::new(items, page, total))
    }

    fn exists(&self, id: MetricTypeId) -> Result<bool> {
        Ok(self.with_inner(|inner| inner.metric_types.contains_key(&id)))
    }
}

impl MetricTypeRepository for MemoryStore {}
