// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structured logging init (SPEC_FULL.md §4.9).

use tracing_subscriber::EnvFilter;

use crate::settings::LoggingSettings;

/// Installs the process-wide `tracing` subscriber. Call once, at the top
/// of `main`. The `FULCRUM_LOG` env var takes priority over
/// `settings.level` when both are set, matching `tracing_subscriber`'s own
/// `EnvFilter::from_env` precedence.
pub fn init(settings: &LoggingSettings) {
    let filter = EnvFilter::try_from_env("FULCRUM_LOG")
        .unwrap_or_else(|_| EnvFilter::new(settings.level.clone()));

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if settings.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
