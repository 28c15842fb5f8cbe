// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! UUID-backed identifier newtypes.
//!
//! Every entity in the data model carries a 128-bit UUID identifier
//! (spec.md §3, `BaseEntity`). [`define_id!`] generates one newtype wrapper
//! per entity kind so that, e.g., a [`crate::AgentId`] can never be passed
//! where a [`crate::ServiceId`] is expected.

use std::str::FromStr;
use uuid::Uuid;

/// Define a newtype ID wrapper around [`Uuid`].
///
/// Generates `new()` (random v4), `from_uuid()`, `nil()`, `Display`,
/// `FromStr`, and the `From`/`AsRef` conversions needed to move between the
/// typed id and the raw `Uuid` at repository boundaries.
#[macro_export]
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        pub struct $name:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub uuid::Uuid);

        impl $name {
            /// Generate a new random (v4) identifier.
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Wrap an existing `Uuid`, e.g. one loaded from storage.
            pub fn from_uuid(id: uuid::Uuid) -> Self {
                Self(id)
            }

            /// The all-zero id, used as an explicit "no value" sentinel in
            /// test fixtures — never a valid persisted id.
            pub const fn nil() -> Self {
                Self(uuid::Uuid::nil())
            }

            pub fn as_uuid(&self) -> uuid::Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(uuid::Uuid::parse_str(s)?))
            }
        }

        impl From<uuid::Uuid> for $name {
            fn from(id: uuid::Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for uuid::Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<uuid::Uuid> for $name {
            fn as_ref(&self) -> &uuid::Uuid {
                &self.0
            }
        }
    };
}

define_id! {
    /// Identifies a [`crate::Participant`].
    pub struct ParticipantId;
}

define_id! {
    /// Identifies an [`crate::AgentType`] catalog entry.
    pub struct AgentTypeId;
}

define_id! {
    /// Identifies an [`crate::Agent`].
    pub struct AgentId;
}

define_id! {
    /// Identifies a [`crate::ServiceGroup`].
    pub struct ServiceGroupId;
}

define_id! {
    /// Identifies a [`crate::ServiceType`] catalog entry.
    pub struct ServiceTypeId;
}

define_id! {
    /// Identifies a [`crate::Service`].
    pub struct ServiceId;
}

define_id! {
    /// Identifies a [`crate::Job`].
    pub struct JobId;
}

define_id! {
    /// Identifies a [`crate::Token`].
    pub struct TokenId;
}

define_id! {
    /// Identifies an [`crate::AuditEntry`].
    pub struct AuditEntryId;
}

define_id! {
    /// Identifies a [`crate::MetricType`] catalog entry.
    pub struct MetricTypeId;
}

define_id! {
    /// Identifies a [`crate::MetricEntry`].
    pub struct MetricEntryId;
}

/// Parse helper used by repository adapters that store ids as plain text
/// columns. Kept separate from `FromStr` so call sites that need a
/// `fulcrum_core::Error` (rather than `uuid::Error`) can map it explicitly.
pub fn parse_uuid(raw: &str) -> Result<Uuid, uuid::Error> {
    Uuid::from_str(raw)
}
