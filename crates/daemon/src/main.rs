// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `fulcrumd` — the Fulcrum control plane process.
//!
//! Loads [`Settings`], installs telemetry, builds the in-memory store and
//! [`Engine`], and runs the background maintenance loop until it receives
//! a shutdown signal. The external RPC interface (spec.md §6) is out of
//! scope for this workspace; this binary exists so the engine and its
//! maintenance loops can be exercised as a real process.

use std::path::PathBuf;

use fulcrum_engine::Engine;
use fulcrum_storage::MemoryStore;
use fulcrumd::{maintenance_loops, telemetry, Settings};
use tokio_util::sync::CancellationToken;
use tracing::info;

fn config_path() -> Option<PathBuf> {
    std::env::var("FULCRUM_CONFIG").ok().map(PathBuf::from)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load(config_path().as_deref())?;
    telemetry::init(&settings.logging);

    info!(store = ?settings.store, "starting fulcrumd");

    let store = MemoryStore::new_with_system_clock();
    let engine = Engine::new(store);

    let shutdown = CancellationToken::new();
    let maintenance_handle = tokio::spawn(maintenance_loops::run(
        engine.clone(),
        settings.maintenance.clone(),
        shutdown.clone(),
    ));

    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");
    shutdown.cancel();
    maintenance_handle.await?;

    Ok(())
}
