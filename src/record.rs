// src/record.rs
//! Helpers for loosely-typed records (JSON objects) of a collection.

use serde_json::{Map, Value};

pub(crate) type Record = Map<String, Value>;

/// Required fields absent from `record`, in schema order, each named once.
pub(crate) fn missing_fields(record: &Record, required: &[String]) -> Vec<String> {
    let mut missing: Vec<String> = Vec::new();
    for field in required {
        if !record.contains_key(field) && !missing.contains(field) {
            missing.push(field.clone());
        }
    }
    missing
}

/// String value of `field`, or an empty string when absent or not a string
pub(crate) fn string_field(record: &Record, field: &str) -> String {
    record
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// `[a, b, c]`
pub(crate) fn format_fields(fields: &[String]) -> String {
    format!("[{}]", fields.join(", "))
}

/// Label an entity for reports: its `_id`, or `#<index>` when it has none.
pub(crate) fn entity_label(entity: &Record, index: usize) -> String {
    match entity.get("_id").and_then(Value::as_str) {
        Some(id) => id.to_string(),
        None => format!("#{index}"),
    }
}

/// Label a nested record: its quoted `_id`, or its index.
pub(crate) fn record_label(record: &Record, index: usize) -> String {
    match record.get("_id").and_then(Value::as_str) {
        Some(id) => format!("\"{id}\""),
        None => index.to_string(),
    }
}

/// Replace a null `description` with an empty string. Returns whether a
/// repair happened.
pub(crate) fn repair_null_description(record: &mut Record) -> bool {
    match record.get_mut("description") {
        Some(description) if description.is_null() => {
            *description = Value::String(String::new());
            true
        }
        _ => false,
    }
}

/// Whether `key` holds something other than an array or null. Such a value
/// is discarded when the field is normalised, so callers report it first.
pub(crate) fn holds_non_array(record: &Record, key: &str) -> bool {
    !matches!(record.get(key), None | Some(Value::Null) | Some(Value::Array(_)))
}

/// The array under `key` when it exists and has elements. Otherwise the
/// field is reset to `[]` and `None` is returned.
pub(crate) fn populated_array<'r>(record: &'r mut Record, key: &str) -> Option<&'r mut Vec<Value>> {
    let populated = matches!(record.get(key), Some(Value::Array(items)) if !items.is_empty());
    if !populated {
        record.insert(key.to_string(), Value::Array(Vec::new()));
        return None;
    }
    record.get_mut(key).and_then(Value::as_array_mut)
}

/// Insert `value` under `field` when there is one to insert. Returns whether
/// the record changed.
pub(crate) fn backfill(record: &mut Record, field: &str, value: Option<&Value>) -> bool {
    match value {
        Some(value) => {
            record.insert(field.to_string(), value.clone());
            true
        }
        None => false,
    }
}
