// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fulcrum-engine: the Commanders, Service lifecycle engine, Job dispatch
//! pipeline, and background maintenance functions that sit behind the
//! Fulcrum external interface (spec.md §4.6–§4.8, §6).

mod job;
mod maintenance;
mod managers;
mod service;

pub use job::JobDispatchResult;
pub use maintenance::MaintenanceReport;

use fulcrum_audit::EntityScope;
use fulcrum_auth::{Action, Authorizer, Identity, Subject};
use fulcrum_core::{AuditEntry, AuthScope, Clock, JsonDoc, Result};
use fulcrum_storage::MemoryStore;

/// Entry point every external interface (RPC, CLI, tests) drives through.
/// Holds the store and the read-only rule table; cheap to clone since both
/// fields are themselves `Arc`-backed.
#[derive(Clone)]
pub struct Engine {
    store: MemoryStore,
    authorizer: std::sync::Arc<Authorizer>,
}

impl Engine {
    pub fn new(store: MemoryStore) -> Self {
        Self {
            store,
            authorizer: std::sync::Arc::new(Authorizer::new()),
        }
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    fn clock(&self) -> &dyn Clock {
        self.store.clock()
    }

    /// Check `identity` may perform `action` on `subject` within `scope`,
    /// before any repository call runs (spec.md §4.2).
    fn authorize(
        &self,
        identity: &Identity,
        subject: Subject,
        action: Action,
        scope: AuthScope,
    ) -> Result<()> {
        self.authorizer.authorize(identity, subject, action, scope)
    }

    /// Write one AuditEntry for a create/delete mutation, inside the
    /// caller's transaction (spec.md §4.5).
    fn audit_create(
        &self,
        identity: &Identity,
        event_type: impl Into<String>,
        entity_id: impl ToString,
        scope: EntityScope,
    ) -> Result<AuditEntry> {
        let entry = fulcrum_audit::create_ctx(
            self.clock(),
            fulcrum_audit::authority_for_role(identity.role),
            authority_id(identity),
            event_type,
            JsonDoc::empty_object(),
            entity_id,
            scope,
        );
        self.store.audit_entries().create(entry)
    }

    /// Write one AuditEntry carrying a structural diff, for an update
    /// mutation (spec.md §4.5).
    fn audit_update(
        &self,
        identity: &Identity,
        event_type: impl Into<String>,
        entity_id: impl ToString,
        scope: EntityScope,
        before: &JsonDoc,
        after: &JsonDoc,
    ) -> Result<AuditEntry> {
        let entry = fulcrum_audit::create_ctx_with_diff(
            self.clock(),
            fulcrum_audit::authority_for_role(identity.role),
            authority_id(identity),
            event_type,
            entity_id,
            scope,
            before,
            after,
        );
        self.store.audit_entries().create(entry)
    }
}

fn authority_id(identity: &Identity) -> Option<String> {
    identity
        .agent_id
        .map(|id| id.to_string())
        .or_else(|| identity.participant_id.map(|id| id.to_string()))
}
