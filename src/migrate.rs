// src/migrate.rs
//! Migration from the legacy `associations` layout to `relationships`.
//!
//! Legacy records carry `associations: {origins: [...], products: [...]}`.
//! Each origin becomes a `child` relationship and each product a `parent`
//! relationship, with the record itself as source. History entries are
//! migrated the same way, using the entry's own `_id` and `name`.

use serde_json::Value;

use crate::entity::{GenericItem, Relationship, RelationshipType};
use crate::error::Result;
use crate::record::{entity_label, holds_non_array, populated_array, string_field, Record};
use crate::report::Report;

/// Result of migrating a collection
#[derive(Debug, Clone, Default)]
pub struct MigrationOutcome {
    pub collection: Vec<Value>,
    /// Entities that had `associations`
    pub migrated: usize,
    /// Entities left as they were
    pub skipped: usize,
    /// Relationships created, history entries included
    pub relationships: usize,
    /// Associations that could not be converted
    pub report: Report,
}

/// Convert every entity and history entry of `collection`.
pub fn migrate_collection(mut collection: Vec<Value>) -> Result<MigrationOutcome> {
    tracing::info!(entities = collection.len(), "migrating associations");

    let mut migrated = 0;
    let mut skipped = 0;
    let mut created = 0;
    let mut report = Report::default();

    for (index, record) in collection.iter_mut().enumerate() {
        let Some(entity) = record.as_object_mut() else {
            report.issue(&format!("#{index}"), "Entity is not an object");
            continue;
        };
        let id = entity_label(entity, index);

        match migrate_record(entity, &id, "Entity", &mut report)? {
            Some(count) => {
                migrated += 1;
                created += count;
            }
            None => skipped += 1,
        }

        if holds_non_array(entity, "history") {
            report.issue(&id, "History is not an array");
        }
        if let Some(history) = populated_array(entity, "history") {
            for (position, entry) in history.iter_mut().enumerate() {
                let scope = format!("History {position}");
                match entry.as_object_mut() {
                    Some(entry) => {
                        created += migrate_record(entry, &id, &scope, &mut report)?.unwrap_or(0);
                    }
                    None => report.issue(&id, format!("{scope} is not an object")),
                }
            }
        }
    }

    tracing::info!(migrated, skipped, relationships = created, "finished migration");
    Ok(MigrationOutcome {
        collection,
        migrated,
        skipped,
        relationships: created,
        report,
    })
}

/// Replace `associations` with `relationships` on one record. Returns the
/// number of relationships created, or `None` when the record had no
/// associations (its `relationships`, if any, are kept).
fn migrate_record(record: &mut Record, id: &str, scope: &str, report: &mut Report) -> Result<Option<usize>> {
    let Some(associations) = record.get("associations").cloned() else {
        if !record.contains_key("relationships") {
            record.insert("relationships".to_string(), Value::Array(Vec::new()));
        }
        return Ok(None);
    };

    let source = GenericItem::new(string_field(record, "_id"), string_field(record, "name"));
    let mut relationships = Vec::new();

    for (group, relationship_type) in [
        ("origins", RelationshipType::Child),
        ("products", RelationshipType::Parent),
    ] {
        let Some(Value::Array(items)) = associations.get(group) else {
            continue;
        };
        for (position, item) in items.iter().enumerate() {
            let Some(target) = item.as_object().filter(|item| item.get("_id").is_some_and(Value::is_string)) else {
                report.issue(id, format!("{scope} {group} {position} has no identifier"));
                continue;
            };
            let target = GenericItem::new(string_field(target, "_id"), string_field(target, "name"));
            let relationship = Relationship::new(source.clone(), target, relationship_type);
            relationships.push(serde_json::to_value(relationship)?);
        }
    }

    let count = relationships.len();
    record.insert("relationships".to_string(), Value::Array(relationships));
    record.remove("associations");
    tracing::debug!(entity = id, scope, relationships = count, "migrated associations");

    Ok(Some(count))
}
