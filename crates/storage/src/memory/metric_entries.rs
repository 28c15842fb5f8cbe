// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::MemoryStore;
use crate::page::{Page, PageRequest};
use crate::repository::MetricEntryRepository;
use fulcrum_core::{AgentId, MetricEntry, MetricEntryId, Result};

impl MetricEntryRepository for MemoryStore {
    fn create(&self, entry: MetricEntry) -> Result<MetricEntry> {
        self.with_inner(|inner| {
            inner.metric_entries.insert(entry.id(), entry.clone());
        });
        Ok(entry)
    }

    fn find_by_id(&self, id: MetricEntryId) -> Result<Option<MetricEntry>> {
        Ok(self.with_inner(|inner| inner.metric_entries.get(&id).cloned()))
    }

    fn list_by_agent(&self, agent_id: AgentId, page: PageRequest) -> Result<Page<MetricEntry>> {
        let items: Vec<MetricEntry> = self.with_inner(|inner| {
            inner
                .metric_entries
                .values()
                .filter(|e| e.agent_id == agent_id)
                .cloned()
                .collect()
        });
        let total = items.len() as u64;
        Ok(Page::new(items, page, total))
    }
}
