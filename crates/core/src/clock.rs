// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable wall-clock timestamps.
//!
//! Repositories stamp `created_at`/`updated_at` (and the Job/Agent timestamp
//! fields) through an injected [`Clock`] rather than calling `Utc::now()`
//! directly, so lifecycle and maintenance-loop tests can advance time
//! deterministically instead of sleeping.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;

/// A source of the current wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Real system clock, used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fake clock for deterministic tests. Starts at a fixed epoch and only
/// moves forward via [`FixedClock::advance`] / [`FixedClock::set`].
#[derive(Debug, Clone)]
pub struct FixedClock {
    current: Arc<Mutex<DateTime<Utc>>>,
}

impl FixedClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            current: Arc::new(Mutex::new(start)),
        }
    }

    /// Advance the clock by the given duration.
    pub fn advance(&self, delta: chrono::Duration) {
        *self.current.lock() += delta;
    }

    /// Set the clock to a specific instant.
    pub fn set(&self, at: DateTime<Utc>) {
        *self.current.lock() = at;
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        // 2024-01-01T00:00:00Z — arbitrary but fixed so tests are reproducible.
        Self::new(DateTime::from_timestamp(1_704_067_200, 0).unwrap_or_else(Utc::now))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current.lock()
    }
}
