// src/collection.rs
//! Reading and writing collection exports.
//!
//! A collection is a JSON array of entity objects. Records are kept as
//! loosely-typed [`serde_json::Value`]s so that exports with missing or
//! malformed fields still load.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{EntityKitError, Result};

/// Parse a collection document. The top level must be an array whose
/// elements are all objects; anything else is rejected.
pub fn parse_collection(text: &str) -> Result<Vec<Value>> {
    let document: Value = serde_json::from_str(text)?;
    let records = match document {
        Value::Array(records) => records,
        other => {
            return Err(EntityKitError::NotACollection(format!(
                "expected a JSON array of entities, found {}",
                kind(&other)
            )))
        }
    };

    if let Some((index, record)) = records.iter().enumerate().find(|(_, r)| !r.is_object()) {
        return Err(EntityKitError::NotACollection(format!(
            "entity {} is {}, expected an object",
            index,
            kind(record)
        )));
    }

    Ok(records)
}

/// Read and parse a collection file
pub fn read_collection(path: &Path) -> Result<Vec<Value>> {
    let text = fs::read_to_string(path)?;
    let collection = parse_collection(&text)?;
    tracing::info!(path = %path.display(), entities = collection.len(), "loaded collection");
    Ok(collection)
}

/// Render a collection with two-space indentation. Non-ASCII characters are
/// written as-is.
pub fn to_pretty_json(collection: &[Value]) -> Result<String> {
    let mut text = serde_json::to_string_pretty(collection)?;
    text.push('\n');
    Ok(text)
}

/// Write a collection, creating parent directories if needed
pub fn write_collection(path: &Path, collection: &[Value]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, to_pretty_json(collection)?)?;
    tracing::info!(path = %path.display(), entities = collection.len(), "wrote collection");
    Ok(())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
