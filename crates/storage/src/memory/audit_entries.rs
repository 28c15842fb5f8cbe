// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::MemoryStore;
use crate::page::{Page, PageRequest};
use crate::repository::AuditEntryRepository;
use fulcrum_core::{AuditEntry, AuditEntryId, AuthScope, Result};

impl AuditEntryRepository for MemoryStore {
    fn create(&self, entry: AuditEntry) -> Result<AuditEntry> {
        self.with_inner(|inner| {
            inner.audit_entries.insert(entry.id, entry.clone());
        });
        Ok(entry)
    }

    fn find_by_id(&self, id: AuditEntryId) -> Result<Option<AuditEntry>> {
        Ok(self.with_inner(|inner| inner.audit_entries.get(&id).cloned()))
    }

    fn list(&self, scope: AuthScope, page: PageRequest) -> Result<Page<AuditEntry>> {
        let items: Vec<AuditEntry> = self.with_inner(|inner| {
            inner
                .audit_entries
                .values()
                .filter(|e| scope.participant_id.is_none_or(|id| e.participant_id == Some(id)))
                .filter(|e| scope.provider_id.is_none_or(|id| e.provider_id == Some(id)))
                .filter(|e| scope.consumer_id.is_none_or(|id| e.consumer_id == Some(id)))
                .filter(|e| scope.agent_id.is_none_or(|id| e.agent_id == Some(id)))
                .cloned()
                .collect()
        });
        let total = items.len() as u64;
        Ok(Page::new(items, page, total))
    }
}
