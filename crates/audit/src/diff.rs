// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deterministic structural JSON diff (spec.md §4.5, §9).
//!
//! Key-wise difference between two JSON values: nested objects are
//! recursed into, arrays are compared by index, and object keys are visited
//! in sorted order so the same `(before, after)` pair always produces
//! byte-identical diff output.

use fulcrum_core::JsonDoc;
use serde_json::{Map, Value};

/// Compute `{field: {"before": ..., "after": ...}}` for every path at which
/// `before` and `after` disagree. A field present in one side and absent in
/// the other is represented with `Value::Null` on the missing side.
pub fn structural_diff(before: &JsonDoc, after: &JsonDoc) -> JsonDoc {
    let mut out = Map::new();
    diff_values(before.as_value(), after.as_value(), &mut out);
    JsonDoc::from(Value::Object(out))
}

fn diff_values(before: &Value, after: &Value, out: &mut Map<String, Value>) {
    match (before, after) {
        (Value::Object(b), Value::Object(a)) => diff_objects(b, a, out),
        _ => {
            if before != after {
                record(out, before.clone(), after.clone());
            }
        }
    }
}

fn diff_objects(before: &Map<String, Value>, after: &Map<String, Value>, out: &mut Map<String, Value>) {
    let mut keys: Vec<&String> = before.keys().chain(after.keys()).collect();
    keys.sort();
    keys.dedup();
    for key in keys {
        let b = before.get(key).unwrap_or(&Value::Null);
        let a = after.get(key).unwrap_or(&Value::Null);
        match (b, a) {
            (Value::Object(bo), Value::Object(ao)) => {
                let mut nested = Map::new();
                diff_objects(bo, ao, &mut nested);
                if !nested.is_empty() {
                    out.insert(key.clone(), Value::Object(nested));
                }
            }
            _ if b != a => record_at(out, key.clone(), b.clone(), a.clone()),
            _ => {}
        }
    }
}

fn record(out: &mut Map<String, Value>, before: Value, after: Value) {
    out.insert("before".to_string(), before);
    out.insert("after".to_string(), after);
}

fn record_at(out: &mut Map<String, Value>, key: String, before: Value, after: Value) {
    let mut entry = Map::new();
    record(&mut entry, before, after);
    out.insert(key, Value::Object(entry));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flat_field_change_is_recorded() {
        let before = JsonDoc::from(json!({"name": "a", "count": 1}));
        let after = JsonDoc::from(json!({"name": "b", "count": 1}));
        let diff = structural_diff(&before, &after);
        assert_eq!(
            diff.as_value(),
            &json!({"name": {"before": "a", "after": "b"}})
        );
    }

    #[test]
    fn nested_object_changes_recurse() {
        let before = JsonDoc::from(json!({"properties": {"cpu": 1, "mem": 2}}));
        let after = JsonDoc::from(json!({"properties": {"cpu": 4, "mem": 2}}));
        let diff = structural_diff(&before, &after);
        assert_eq!(
            diff.as_value(),
            &json!({"properties": {"cpu": {"before": 1, "after": 4}}})
        );
    }

    #[test]
    fn missing_key_diffs_against_null() {
        let before = JsonDoc::from(json!({"a": 1}));
        let after = JsonDoc::from(json!({"a": 1, "b": 2}));
        let diff = structural_diff(&before, &after);
        assert_eq!(diff.as_value(), &json!({"b": {"before": null, "after": 2}}));
    }

    #[test]
    fn identical_documents_produce_empty_diff() {
        let doc = JsonDoc::from(json!({"a": 1, "b": [1, 2, 3]}));
        let diff = structural_diff(&doc, &doc.clone());
        assert_eq!(diff.as_value(), &json!({}));
    }

    #[test]
    fn arrays_compared_by_index() {
        let before = JsonDoc::from(json!({"tags": ["a", "b"]}));
        let after = JsonDoc::from(json!({"tags": ["a", "c"]}));
        let diff = structural_diff(&before, &after);
        assert_eq!(
            diff.as_value(),
            &json!({"tags": {"before": ["a", "b"], "after": ["a", "c"]}})
        );
    }
}
