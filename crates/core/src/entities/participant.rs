// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! [`Participant`] — a tenant (spec.md §3).

use crate::entities::base::BaseEntity;
use crate::error::Error;
use crate::id::ParticipantId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Enabled/Disabled lifecycle flag for a Participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantStatus {
    Enabled,
    Disabled,
}

crate::simple_display! {
    ParticipantStatus {
        Enabled => "enabled",
        Disabled => "disabled",
    }
}

/// Attribute map: string keys (non-empty) to sets of string values.
/// `BTreeMap`/`BTreeSet` keep serialization and diffing key-ordered, which
/// the audit differ relies on for deterministic output (spec.md §9).
pub type AttributeMap = BTreeMap<String, BTreeSet<String>>;

/// A tenant. May act as provider, consumer, or both — distinguished only by
/// role in a given Service, never by a field on `Participant` itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub base: BaseEntity<ParticipantId>,
    pub name: String,
    /// ISO 3166-1 alpha-2 country code, or empty.
    pub country: String,
    pub attributes: AttributeMap,
    pub status: ParticipantStatus,
}

impl Participant {
    pub fn id(&self) -> ParticipantId {
        self.base.id
    }

    /// Construct a new Participant from its creation fields, assigning a
    /// fresh id and timestamp. The only place a `Participant` comes into
    /// being outside of deserialization.
    pub fn from_fields(fields: ParticipantFields, now: chrono::DateTime<chrono::Utc>) -> Self {
        Self {
            base: BaseEntity::new(ParticipantId::new(), now),
            name: fields.name,
            country: fields.country,
            attributes: fields.attributes,
            status: fields.status,
        }
    }

    /// Validate the fields that don't depend on repository state (name
    /// non-empty, country code shape, attribute keys non-empty). Dependency
    /// checks (e.g. "no owned Agents") live in the Commander, not here.
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid("participant name must not be empty"));
        }
        if !self.country.is_empty()
            && !(self.country.len() == 2 && self.country.chars().all(|c| c.is_ascii_uppercase()))
        {
            return Err(Error::invalid(
                "country must be an ISO 3166-1 alpha-2 code or empty",
            ));
        }
        for key in self.attributes.keys() {
            if key.trim().is_empty() {
                return Err(Error::invalid("attribute keys must not be empty"));
            }
        }
        Ok(())
    }
}

crate::builder! {
    pub struct ParticipantBuilder => ParticipantFields {
        into {
            name: String = "test-participant",
            country: String = "",
        }
        set {
            attributes: AttributeMap = AttributeMap::new(),
            status: ParticipantStatus = ParticipantStatus::Enabled,
        }
    }
}

/// Fields needed to create a Participant, before the repository assigns an
/// id and timestamps.
#[derive(Debug, Clone)]
pub struct ParticipantFields {
    pub name: String,
    pub country: String,
    pub attributes: AttributeMap,
    pub status: ParticipantStatus,
}

/// Partial-update input: `None` means "leave unchanged" (spec.md §9).
#[derive(Debug, Clone, Default)]
pub struct ParticipantUpdate {
    pub name: Option<String>,
    pub country: Option<String>,
    pub attributes: Option<AttributeMap>,
    pub status: Option<ParticipantStatus>,
}
