// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! [`BaseEntity`] — the id/timestamp pair every persisted entity carries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fields common to every persisted entity (spec.md §3).
///
/// Timestamps are set by the repository layer, never by callers — a
/// `BaseEntity` is only ever constructed by a repository's `Create`/`Save`
/// implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseEntity<Id> {
    pub id: Id,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<Id: Copy> BaseEntity<Id> {
    pub fn new(id: Id, now: DateTime<Utc>) -> Self {
        Self {
            id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}
