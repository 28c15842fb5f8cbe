// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Opaque JSON document type for `Attributes`/`Properties`/`Resources`
//! columns (spec.md §9 Design Notes).
//!
//! Validation here constrains only structural shape — an object or `null` —
//! never the semantics of individual keys, which are the Agent/Service
//! domain's concern.

use crate::error::Error;
use serde_json::Value;

/// An opaque JSON document. Always `null` or a JSON object at the top level;
/// arbitrary nesting inside is untouched by the control plane.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct JsonDoc(Value);

impl JsonDoc {
    pub fn null() -> Self {
        Self(Value::Null)
    }

    pub fn empty_object() -> Self {
        Self(Value::Object(Default::default()))
    }

    /// Construct from an already-validated `Value`, rejecting anything that
    /// isn't `null` or an object.
    pub fn new(value: Value) -> Result<Self, Error> {
        match value {
            Value::Null | Value::Object(_) => Ok(Self(value)),
            other => Err(Error::invalid(format!(
                "document must be a JSON object or null, got {other}"
            ))),
        }
    }

    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Structural equality — the property-update check in spec.md §4.6
    /// ("whose `TargetProperties` differ (deep-equal) from
    /// `CurrentProperties`") is exactly `serde_json::Value`'s derived
    /// `PartialEq`, which already compares objects key-by-key regardless of
    /// insertion order.
    pub fn deep_eq(&self, other: &JsonDoc) -> bool {
        self.0 == other.0
    }
}

impl From<Value> for JsonDoc {
    /// Infallible conversion for call sites that already know the value is
    /// an object (e.g. `serde_json::json!({...})` literals); prefer
    /// [`JsonDoc::new`] when the value comes from outside the process.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(_) | Value::Null => Self(value),
            other => Self(Value::Object(
                [("value".to_string(), other)].into_iter().collect(),
            )),
        }
    }
}
