// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory transactional store (spec.md §4.4).
//!
//! `Inner` holds every entity table behind a single `ReentrantMutex`.
//! `atomic` takes the lock for the whole closure — giving callers real
//! cross-thread isolation, not just rollback-on-error — and snapshots
//! `Inner` up front so an `Err`/panic from the closure restores it exactly.
//! The lock is reentrant because the closure's own repository calls
//! (`tx.participants().create(...)`, etc.) re-lock the same guard on the
//! same thread; a plain `Mutex` would deadlock there.

mod agent_types;
mod agents;
mod audit_entries;
mod jobs;
mod metric_entries;
mod metric_types;
mod participants;
mod service_groups;
mod service_types;
mod services;
mod tokens;

use fulcrum_core::{
    Agent, AgentType, AuditEntry, Clock, Job, MetricEntry, MetricType, Participant, Service,
    ServiceGroup, ServiceType, SystemClock, Token,
};
use parking_lot::ReentrantMutex;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

#[derive(Debug, Default, Clone)]
pub(crate) struct Inner {
    pub(crate) participants: BTreeMap<fulcrum_core::ParticipantId, Participant>,
    pub(crate) agent_types: BTreeMap<fulcrum_core::AgentTypeId, AgentType>,
    pub(crate) agents: BTreeMap<fulcrum_core::AgentId, Agent>,
    pub(crate) service_groups: BTreeMap<fulcrum_core::ServiceGroupId, ServiceGroup>,
    pub(crate) service_types: BTreeMap<fulcrum_core::ServiceTypeId, ServiceType>,
    pub(crate) services: BTreeMap<fulcrum_core::ServiceId, Service>,
    pub(crate) jobs: BTreeMap<fulcrum_core::JobId, Job>,
    pub(crate) tokens: BTreeMap<fulcrum_core::TokenId, Token>,
    pub(crate) audit_entries: BTreeMap<fulcrum_core::AuditEntryId, AuditEntry>,
    pub(crate) metric_types: BTreeMap<fulcrum_core::MetricTypeId, MetricType>,
    pub(crate) metric_entries: BTreeMap<fulcrum_core::MetricEntryId, MetricEntry>,
}

/// The only persistence backend this workspace ships (spec.md §9 Design
/// Notes; SPEC_FULL.md §4.10 `StoreKind::Memory`). Every repository trait in
/// `crate::repository` is implemented directly on this type; `.participants()`
/// etc. hand back `&self` as the matching trait object so call sites look
/// the same as they would against a future SQL-backed store.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<ReentrantMutex<RefCell<Inner>>>,
    clock: Arc<dyn Clock>,
}

impl MemoryStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(ReentrantMutex::new(RefCell::new(Inner::default()))),
            clock,
        }
    }

    /// A store with a real system clock, for production wiring.
    pub fn new_with_system_clock() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    /// A store for tests: a [`fulcrum_core::FixedClock`] the caller can
    /// advance deterministically.
    #[cfg(any(test, feature = "test-support"))]
    pub fn new_for_test() -> (Self, Arc<fulcrum_core::FixedClock>) {
        let clock = Arc::new(fulcrum_core::FixedClock::default());
        (Self::new(clock.clone()), clock)
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub(crate) fn with_inner<R>(&self, f: impl FnOnce(&mut Inner) -> R) -> R {
        let guard = self.inner.lock();
        let mut inner = guard.borrow_mut();
        f(&mut inner)
    }

    /// Run `f` against a snapshot-protected view of the store (spec.md
    /// §4.4). Holds the store's lock for the whole closure — nested
    /// repository calls on `self` re-lock reentrantly rather than
    /// deadlocking — and rolls back to the pre-call snapshot if `f` returns
    /// `Err` or panics; the panic is then resumed so the caller's unwind is
    /// unaffected.
    pub fn atomic<R>(
        &self,
        f: impl FnOnce(&MemoryStore) -> fulcrum_core::Result<R>,
    ) -> fulcrum_core::Result<R> {
        let guard = self.inner.lock();
        let snapshot = guard.borrow().clone();

        match panic::catch_unwind(AssertUnwindSafe(|| f(self))) {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => {
                *guard.borrow_mut() = snapshot;
                Err(err)
            }
            Err(payload) => {
                *guard.borrow_mut() = snapshot;
                panic::resume_unwind(payload);
            }
        }
    }

    pub fn participants(&self) -> &dyn crate::repository::ParticipantRepository {
        self
    }
    pub fn agent_types(&self) -> &dyn crate::repository::AgentTypeRepository {
        self
    }
    pub fn agents(&self) -> &dyn crate::repository::AgentRepository {
        self
    }
    pub fn service_groups(&self) -> &dyn crate::repository::ServiceGroupRepository {
        self
    }
    pub fn service_types(&self) -> &dyn crate::repository::ServiceTypeRepository {
        self
    }
    pub fn services(&self) -> &dyn crate::repository::ServiceRepository {
        self
    }
    pub fn jobs(&self) -> &dyn crate::repository::JobRepository {
        self
    }
    pub fn tokens(&self) -> &dyn crate::repository::TokenRepository {
        self
    }
    pub fn audit_entries(&self) -> &dyn crate::repository::AuditEntryRepository {
        self
    }
    pub fn metric_types(&self) -> &dyn crate::repository::MetricTypeRepository {
        self
    }
    pub fn metric_entries(&self) -> &dyn crate::repository::MetricEntryRepository {
        self
    }
}
