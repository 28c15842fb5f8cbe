// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed configuration (spec.md §9 additions, SPEC_FULL.md §4.10).
//!
//! Layering is "file, then env": [`Settings::load`] reads a TOML file if
//! one is given, falls back to [`Settings::default`] otherwise, then
//! applies `FULCRUM_`-prefixed environment overrides on top.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("reading config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value for {field}: {message}")]
    InvalidEnvOverride { field: String, message: String },
}

/// The storage backend a daemon instance runs against. `Memory` is the
/// only variant this workspace ships; the name leaves room for a future
/// SQL backend without widening the repository trait surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    #[default]
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MaintenanceSettings {
    #[serde(with = "humantime_serde")]
    pub agent_disconnect_after: Duration,
    #[serde(with = "humantime_serde")]
    pub job_timeout: Duration,
    #[serde(with = "humantime_serde")]
    pub completed_job_retention: Duration,
    #[serde(with = "humantime_serde")]
    pub sweep_interval: Duration,
}

impl Default for MaintenanceSettings {
    fn default() -> Self {
        Self {
            agent_disconnect_after: Duration::from_secs(5 * 60),
            job_timeout: Duration::from_secs(10 * 60),
            completed_job_retention: Duration::from_secs(24 * 60 * 60),
            sweep_interval: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenSettings {
    #[serde(with = "humantime_serde")]
    pub default_ttl: Duration,
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            default_ttl: Duration::from_secs(90 * 24 * 60 * 60),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub store: StoreKind,
    pub maintenance: MaintenanceSettings,
    pub tokens: TokenSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Reads `path` if given, otherwise starts from [`Settings::default`],
    /// then applies `FULCRUM_`-prefixed environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let mut settings = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
                    path: path.display().to_string(),
                    source,
                })?;
                toml::from_str(&text).map_err(|source| SettingsError::Parse {
                    path: path.display().to_string(),
                    source,
                })?
            }
            None => Settings::default(),
        };
        settings.apply_env_overrides()?;
        Ok(settings)
    }

    fn apply_env_overrides(&mut self) -> Result<(), SettingsError> {
        if let Ok(value) = std::env::var("FULCRUM_LOGGING_LEVEL") {
            self.logging.level = value;
        }
        if let Ok(value) = std::env::var("FULCRUM_LOGGING_JSON") {
            self.logging.json = parse_bool("FULCRUM_LOGGING_JSON", &value)?;
        }
        if let Ok(value) = std::env::var("FULCRUM_MAINTENANCE_SWEEP_INTERVAL") {
            self.maintenance.sweep_interval = parse_duration("FULCRUM_MAINTENANCE_SWEEP_INTERVAL", &value)?;
        }
        if let Ok(value) = std::env::var("FULCRUM_MAINTENANCE_AGENT_DISCONNECT_AFTER") {
            self.maintenance.agent_disconnect_after =
                parse_duration("FULCRUM_MAINTENANCE_AGENT_DISCONNECT_AFTER", &value)?;
        }
        if let Ok(value) = std::env::var("FULCRUM_MAINTENANCE_JOB_TIMEOUT") {
            self.maintenance.job_timeout = parse_duration("FULCRUM_MAINTENANCE_JOB_TIMEOUT", &value)?;
        }
        if let Ok(value) = std::env::var("FULCRUM_MAINTENANCE_COMPLETED_JOB_RETENTION") {
            self.maintenance.completed_job_retention =
                parse_duration("FULCRUM_MAINTENANCE_COMPLETED_JOB_RETENTION", &value)?;
        }
        if let Ok(value) = std::env::var("FULCRUM_TOKENS_DEFAULT_TTL") {
            self.tokens.default_ttl = parse_duration("FULCRUM_TOKENS_DEFAULT_TTL", &value)?;
        }
        Ok(())
    }
}

fn parse_bool(field: &str, raw: &str) -> Result<bool, SettingsError> {
    raw.parse().map_err(|_| SettingsError::InvalidEnvOverride {
        field: field.to_string(),
        message: format!("{raw:?} is not a bool"),
    })
}

fn parse_duration(field: &str, raw: &str) -> Result<Duration, SettingsError> {
    humantime::parse_duration(raw).map_err(|source| SettingsError::InvalidEnvOverride {
        field: field.to_string(),
        message: source.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let settings = Settings::default();
        assert_eq!(settings.store, StoreKind::Memory);
        assert_eq!(settings.maintenance.sweep_interval, Duration::from_secs(30));
        assert_eq!(settings.logging.level, "info");
        assert!(!settings.logging.json);
    }

    #[test]
    fn loads_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fulcrum.toml");
        std::fs::write(
            &path,
            r#"
            [maintenance]
            sweep_interval = "1m"

            [logging]
            level = "debug"
            json = true
            "#,
        )
        .unwrap();
        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.maintenance.sweep_interval, Duration::from_secs(60));
        assert_eq!(settings.logging.level, "debug");
        assert!(settings.logging.json);
    }

    #[test]
    fn env_override_wins_over_file_default() {
        let settings_before = Settings::default().maintenance.sweep_interval;
        assert_eq!(settings_before, Duration::from_secs(30));

        std::env::set_var("FULCRUM_MAINTENANCE_SWEEP_INTERVAL", "5s");
        let settings = Settings::load(None).unwrap();
        std::env::remove_var("FULCRUM_MAINTENANCE_SWEEP_INTERVAL");

        assert_eq!(settings.maintenance.sweep_interval, Duration::from_secs(5));
    }
}
