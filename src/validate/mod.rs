// src/validate/mod.rs
//! Collection validation and repair.
//!
//! One pass over a collection checks every entity, attribute, value and
//! history entry against a [`Schema`]. Problems never stop the pass: each one
//! becomes an [`Issue`](crate::report::Issue) (left as-is) or a
//! [`Warning`](crate::report::Warning) (repaired in place), and the pass moves
//! on to the next record.
//!
//! Repairs are limited to fields that are absent and have an obvious source:
//! the owning entity, a fixed default, or a fresh version token.

mod attribute;
mod history;

use std::collections::HashSet;

use serde_json::Value;

use crate::collection::parse_collection;
use crate::config::Schema;
use crate::error::Result;
use crate::report::Report;
use crate::tokens::TokenSource;

use crate::record::{
    entity_label, format_fields, holds_non_array, missing_fields, populated_array,
    repair_null_description, Record,
};
use crate::entity::RelationshipType;

/// Result of a validation pass
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    /// The repaired collection, in input order
    pub collection: Vec<Value>,
    pub report: Report,
}

/// Values copied from an entity into its nested records
#[derive(Debug, Clone, Default)]
pub(crate) struct EntityContext {
    pub id: Option<Value>,
    pub name: Option<Value>,
    pub owner: Option<Value>,
    pub created: Option<Value>,
    pub timestamp: Option<Value>,
    pub attachments: Option<Value>,
}

impl EntityContext {
    fn capture(entity: &Record) -> Self {
        Self {
            id: entity.get("_id").cloned(),
            name: entity.get("name").cloned(),
            owner: entity.get("owner").cloned(),
            created: entity.get("created").cloned(),
            // Entities without a modification timestamp fall back to creation
            timestamp: entity.get("timestamp").or_else(|| entity.get("created")).cloned(),
            attachments: entity.get("attachments").cloned(),
        }
    }
}

/// Checks and repairs collections against a schema.
pub struct Validator<'a, T: TokenSource> {
    schema: &'a Schema,
    tokens: T,
}

impl<'a, T: TokenSource> Validator<'a, T> {
    pub fn new(schema: &'a Schema, tokens: T) -> Self {
        Self { schema, tokens }
    }

    /// Validate every entity of `collection` in order, repairing what can be
    /// repaired.
    ///
    /// Only a failure of the token source aborts the pass.
    pub fn run(&mut self, mut collection: Vec<Value>) -> Result<ValidationOutcome> {
        tracing::info!(entities = collection.len(), "validating collection");

        // Built up front so relationships may point at later entities
        let known = identifier_index(&collection);
        let mut report = Report::default();

        for (index, record) in collection.iter_mut().enumerate() {
            match record.as_object_mut() {
                Some(entity) => self.validate_entity(index, entity, &known, &mut report)?,
                None => report.issue(&format!("#{index}"), "Entity is not an object"),
            }
        }

        tracing::info!(
            issues = report.issues.len(),
            warnings = report.warnings.len(),
            "finished validation"
        );
        Ok(ValidationOutcome { collection, report })
    }

    fn validate_entity(
        &mut self,
        index: usize,
        entity: &mut Record,
        known: &HashSet<String>,
        report: &mut Report,
    ) -> Result<()> {
        let id = entity_label(entity, index);

        let missing = missing_fields(entity, &self.schema.entity);
        if !missing.is_empty() {
            report.issue(
                &id,
                format!("Missing {} fields: {}", missing.len(), format_fields(&missing)),
            );
        }

        check_relationships(&id, entity, known, report);

        if repair_null_description(entity) {
            report.warning(&id, "Description is \"null\"");
        }

        let context = EntityContext::capture(entity);

        if holds_non_array(entity, "attributes") {
            report.issue(&id, "Attributes is not an array");
        }
        if let Some(attributes) = populated_array(entity, "attributes") {
            for (position, attribute) in attributes.iter_mut().enumerate() {
                self.validate_attribute(
                    &id,
                    "Attribute",
                    position,
                    attribute,
                    context.owner.as_ref(),
                    context.timestamp.as_ref(),
                    report,
                );
            }
        }

        if holds_non_array(entity, "history") {
            report.issue(&id, "History is not an array");
        }
        if let Some(history) = populated_array(entity, "history") {
            for (position, entry) in history.iter_mut().enumerate() {
                self.validate_history(&id, position, entry, &context, report)?;
            }
        }

        Ok(())
    }
}

/// Identifiers of every entity in the collection
pub fn identifier_index(collection: &[Value]) -> HashSet<String> {
    collection
        .iter()
        .filter_map(|entity| entity.get("_id").and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}

/// Report relationships whose target is not in the collection or whose type
/// is not a known relationship type. Relationships are never modified.
fn check_relationships(id: &str, entity: &Record, known: &HashSet<String>, report: &mut Report) {
    let Some(Value::Array(relationships)) = entity.get("relationships") else {
        return;
    };

    for (position, relationship) in relationships.iter().enumerate() {
        let target = relationship
            .get("target")
            .and_then(|target| target.get("_id"))
            .and_then(Value::as_str);

        match target {
            Some(target) if known.contains(target) => {}
            Some(target) => report.issue(id, format!("Target {target} does not exist")),
            None => report.issue(
                id,
                format!("Relationship {position} has no target identifier"),
            ),
        }

        match relationship.get("type") {
            None => {}
            Some(Value::String(kind)) => {
                if let Err(err) = kind.parse::<RelationshipType>() {
                    report.issue(id, format!("Relationship {position}: {err}"));
                }
            }
            Some(other) => report.issue(
                id,
                format!("Relationship {position}: Invalid relationship type: {other}"),
            ),
        }
    }
}

/// Parse a collection document and validate it in one step.
pub fn validate_document<T: TokenSource>(
    text: &str,
    schema: &Schema,
    tokens: T,
) -> Result<ValidationOutcome> {
    let collection = parse_collection(text)?;
    Validator::new(schema, tokens).run(collection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{RandomTokens, SequenceTokens, VERSION_ALPHABET};
    use serde_json::json;

    /// An entity that satisfies the default schema
    fn complete_entity(id: &str) -> Value {
        json!({
            "_id": id,
            "timestamp": "2023-01-02T00:00:00.000Z",
            "created": "2023-01-01T00:00:00.000Z",
            "name": format!("Entity {id}"),
            "archived": false,
            "description": "",
            "owner": "0000-0002-3481-952X",
            "projects": [],
            "relationships": [],
            "attributes": [],
            "attachments": [],
            "history": []
        })
    }

    fn run(collection: Vec<Value>) -> ValidationOutcome {
        let schema = Schema::default();
        Validator::new(&schema, SequenceTokens::new(["0123456789"]))
            .run(collection)
            .unwrap()
    }

    #[test]
    fn test_complete_collection_is_clean() {
        let outcome = run(vec![complete_entity("e1"), complete_entity("e2")]);
        assert!(outcome.report.is_clean());
        assert_eq!(outcome.collection[0], complete_entity("e1"));
    }

    #[test]
    fn test_dangling_target_and_null_description() {
        let input = json!([{
            "_id": "e1",
            "relationships": [{"target": {"_id": "e2"}}],
            "description": null,
            "attributes": [],
            "history": []
        }]);
        let outcome = run(input.as_array().cloned().unwrap());
        let entity = &outcome.collection[0];

        assert_eq!(entity["description"], "");
        assert_eq!(outcome.report.warnings.len(), 1);
        assert_eq!(outcome.report.warnings[0].id, "e1");

        let targets: Vec<_> = outcome
            .report
            .issues_for("e1")
            .filter(|issue| issue.message == "Target e2 does not exist")
            .collect();
        assert_eq!(targets.len(), 1);
        assert_eq!(entity["relationships"], json!([{"target": {"_id": "e2"}}]));
    }

    #[test]
    fn test_forward_reference_resolves() {
        let mut first = complete_entity("e1");
        first["relationships"] = json!([{
            "source": {"_id": "e1", "name": "Entity e1"},
            "target": {"_id": "e2", "name": "Entity e2"},
            "type": "parent"
        }]);
        let outcome = run(vec![first, complete_entity("e2")]);
        assert!(outcome.report.is_clean());
    }

    #[test]
    fn test_one_issue_per_dangling_relationship() {
        let mut entity = complete_entity("e1");
        entity["relationships"] = json!([
            {"target": {"_id": "gone1"}},
            {"target": {"_id": "e1"}},
            {"target": {"_id": "gone2"}},
            {"source": {"_id": "e1"}}
        ]);
        let outcome = run(vec![entity]);
        let messages: Vec<_> = outcome.report.issues.iter().map(|i| i.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Target gone1 does not exist",
                "Target gone2 does not exist",
                "Relationship 3 has no target identifier"
            ]
        );
    }

    #[test]
    fn test_missing_entity_fields_reported_once_not_synthesized() {
        let mut entity = complete_entity("e1");
        let map = entity.as_object_mut().unwrap();
        map.remove("owner");
        map.remove("projects");

        let outcome = run(vec![entity]);
        assert_eq!(outcome.report.issues.len(), 1);
        assert_eq!(
            outcome.report.issues[0].message,
            "Missing 2 fields: [owner, projects]"
        );
        let output = outcome.collection[0].as_object().unwrap();
        assert!(!output.contains_key("owner"));
        assert!(!output.contains_key("projects"));
    }

    #[test]
    fn test_attributes_and_history_normalized() {
        let outcome = run(vec![json!({"_id": "e1", "attributes": null})]);
        let entity = &outcome.collection[0];
        assert_eq!(entity["attributes"], json!([]));
        assert_eq!(entity["history"], json!([]));
    }

    #[test]
    fn test_entity_without_id_is_labelled_by_index() {
        let outcome = run(vec![complete_entity("e1"), json!({"name": "anonymous"})]);
        assert!(outcome.report.issues_for("#1").count() >= 1);
    }

    #[test]
    fn test_attribute_backfilled_from_entity() {
        let mut entity = complete_entity("e1");
        entity["attributes"] = json!([{
            "_id": "a1",
            "name": "Attribute",
            "description": "",
            "values": []
        }]);
        let outcome = run(vec![entity]);
        let attribute = &outcome.collection[0]["attributes"][0];

        assert_eq!(attribute["owner"], "0000-0002-3481-952X");
        assert_eq!(attribute["archived"], false);
        assert_eq!(attribute["timestamp"], "2023-01-02T00:00:00.000Z");
        assert_eq!(outcome.report.issues.len(), 1);
        assert_eq!(
            outcome.report.issues[0].message,
            "Attribute \"a1\" missing 3 fields: [timestamp, archived, owner]"
        );
        assert_eq!(outcome.report.issues[0].id, "e1");
    }

    #[test]
    fn test_attribute_timestamp_falls_back_to_created() {
        let mut entity = complete_entity("e1");
        entity.as_object_mut().unwrap().remove("timestamp");
        entity["attributes"] = json!([{"_id": "a1", "name": "Attribute", "values": []}]);
        let outcome = run(vec![entity]);

        assert_eq!(
            outcome.collection[0]["attributes"][0]["timestamp"],
            "2023-01-01T00:00:00.000Z"
        );
    }

    #[test]
    fn test_value_gaps_are_not_repaired() {
        let mut entity = complete_entity("e1");
        entity["attributes"] = json!([{
            "_id": "a1",
            "timestamp": "t",
            "name": "Attribute",
            "archived": false,
            "description": "",
            "owner": "o",
            "values": [{"_id": "v1", "name": "Count", "type": "number"}]
        }]);
        let outcome = run(vec![entity]);
        assert_eq!(
            outcome.report.issues[0].message,
            "Attribute \"a1\" value \"v1\" missing 1 fields: [data]"
        );
        let value = &outcome.collection[0]["attributes"][0]["values"][0];
        assert!(value.get("data").is_none());
    }

    #[test]
    fn test_history_backfilled_from_entity() {
        let mut entity = complete_entity("e1");
        entity["name"] = json!("Sample");
        entity["history"] = json!([{
            "timestamp": "2023-01-01T12:00:00.000Z",
            "archived": false,
            "description": null,
            "owner": "0000-0002-3481-952X",
            "projects": [],
            "relationships": [],
            "attributes": []
        }]);

        let schema = Schema::default();
        let outcome = Validator::new(&schema, RandomTokens).run(vec![entity]).unwrap();
        let history = &outcome.collection[0]["history"][0];

        assert_eq!(history["name"], "Sample");
        assert_eq!(history["_id"], "e1");
        assert_eq!(history["created"], "2023-01-01T00:00:00.000Z");
        assert_eq!(history["attachments"], json!([]));
        assert_eq!(history["description"], "");

        let version = history["version"].as_str().unwrap();
        assert_eq!(version.len(), 10);
        assert!(version.chars().all(|c| VERSION_ALPHABET.contains(c)));

        assert_eq!(outcome.report.issues.len(), 1);
        assert_eq!(
            outcome.report.issues[0].message,
            "History 0 missing 5 fields: [_id, version, created, name, attachments]"
        );
        assert_eq!(outcome.report.warnings.len(), 1);
        assert_eq!(
            outcome.report.warnings[0].message,
            "History 0 description is \"null\""
        );
    }

    #[test]
    fn test_history_version_uses_token_source() {
        let mut entity = complete_entity("e1");
        let mut entry = complete_entity("e1");
        entry["version"] = json!("old");
        entry.as_object_mut().unwrap().remove("history");
        entity["history"] = json!([entry.clone(), entry]);
        entity["history"][1].as_object_mut().unwrap().remove("version");

        let schema = Schema::default();
        let mut tokens = SequenceTokens::new(["abcdef0123"]);
        let outcome = Validator::new(&schema, &mut tokens).run(vec![entity]).unwrap();

        assert_eq!(outcome.collection[0]["history"][0]["version"], "old");
        assert_eq!(outcome.collection[0]["history"][1]["version"], "abcdef0123");
        assert_eq!(tokens.issued(), 1);
    }

    #[test]
    fn test_history_attribute_backfill_uses_history_timestamp() {
        let mut entity = complete_entity("e1");
        let mut entry = complete_entity("e1");
        entry.as_object_mut().unwrap().remove("history");
        entry["version"] = json!("0000000001");
        entry["timestamp"] = json!("2022-06-01T00:00:00.000Z");
        entry["attributes"] = json!([{"_id": "a1", "name": "A", "description": "", "values": []}]);
        entity["history"] = json!([entry]);

        let outcome = run(vec![entity]);
        let attribute = &outcome.collection[0]["history"][0]["attributes"][0];
        assert_eq!(attribute["timestamp"], "2022-06-01T00:00:00.000Z");
        assert_eq!(attribute["owner"], "0000-0002-3481-952X");
        assert_eq!(attribute["archived"], false);
        assert_eq!(
            outcome.report.issues[0].message,
            "History 0 attribute \"a1\" missing 3 fields: [timestamp, archived, owner]"
        );
    }

    #[test]
    fn test_malformed_nested_records_do_not_abort() {
        let mut entity = complete_entity("e1");
        entity["attributes"] = json!([42, {"_id": "a1", "values": ["x"]}]);
        entity["history"] = json!(["not a snapshot"]);
        entity["relationships"] = json!("nope");

        let outcome = run(vec![entity, complete_entity("e2")]);
        let messages: Vec<_> = outcome.report.issues.iter().map(|i| i.message.as_str()).collect();
        assert!(messages.contains(&"Attribute 0 is not an object"));
        assert!(messages.contains(&"Attribute \"a1\" value 0 is not an object"));
        assert!(messages.contains(&"History 0 is not an object"));
        assert!(outcome.report.issues_for("e2").next().is_none());
    }

    #[test]
    fn test_non_array_collections_are_reported_before_reset() {
        let mut entity = complete_entity("e1");
        entity["attributes"] = json!({"_id": "a1", "name": "A", "values": []});
        entity["history"] = json!("corrupted snapshot blob");

        let outcome = run(vec![entity]);
        let messages: Vec<_> = outcome.report.issues.iter().map(|i| i.message.as_str()).collect();
        assert_eq!(messages, vec!["Attributes is not an array", "History is not an array"]);
        assert_eq!(outcome.collection[0]["attributes"], json!([]));
        assert_eq!(outcome.collection[0]["history"], json!([]));
    }

    #[test]
    fn test_null_collections_normalize_quietly() {
        let mut entity = complete_entity("e1");
        entity["attributes"] = Value::Null;
        entity["history"] = Value::Null;

        let outcome = run(vec![entity]);
        assert!(outcome.report.is_clean());
        assert_eq!(outcome.collection[0]["history"], json!([]));
    }

    #[test]
    fn test_non_array_values_are_reported() {
        let mut entity = complete_entity("e1");
        entity["attributes"] = json!([{
            "_id": "a1",
            "timestamp": "t",
            "name": "Attribute",
            "archived": false,
            "description": "",
            "owner": "o",
            "values": {"_id": "v1"}
        }]);
        let outcome = run(vec![entity]);
        assert_eq!(outcome.report.issues.len(), 1);
        assert_eq!(
            outcome.report.issues[0].message,
            "Attribute \"a1\" values is not an array"
        );
        assert_eq!(outcome.collection[0]["attributes"][0]["values"], json!({"_id": "v1"}));
    }

    #[test]
    fn test_unknown_relationship_type_is_reported() {
        let mut entity = complete_entity("e1");
        entity["relationships"] = json!([
            {"target": {"_id": "e1"}, "type": "sibling"},
            {"target": {"_id": "e1"}, "type": "Parent"},
            {"target": {"_id": "e1"}, "type": 3}
        ]);
        let outcome = run(vec![entity]);
        let messages: Vec<_> = outcome.report.issues.iter().map(|i| i.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Relationship 0: Invalid relationship type: sibling",
                "Relationship 2: Invalid relationship type: 3"
            ]
        );
        assert_eq!(outcome.collection[0]["relationships"][0]["type"], "sibling");
    }

    #[test]
    fn test_second_pass_adds_nothing() {
        let mut entity = complete_entity("e1");
        entity["description"] = Value::Null;
        entity["attributes"] = json!([{"_id": "a1", "name": "A", "description": "", "values": []}]);
        entity["history"] = json!([{
            "timestamp": "t",
            "archived": false,
            "description": null,
            "owner": "o",
            "projects": [],
            "relationships": [],
            "attributes": []
        }]);

        let mut incomplete = complete_entity("e2");
        incomplete["description"] = Value::Null;
        incomplete.as_object_mut().unwrap().remove("owner");

        let first = run(vec![entity, incomplete]);
        assert!(!first.report.is_clean());

        let second = run(first.collection.clone());
        assert!(second.report.warnings.is_empty());
        // Only the owner of e2 is still missing, and it was already reported
        assert_eq!(second.report.issues.len(), 1);
        assert!(first.report.issues.contains(&second.report.issues[0]));
        assert!(second.report.issues_for("e1").next().is_none());
    }

    #[test]
    fn test_validate_document() {
        let schema = Schema::default();
        let outcome = validate_document(
            r#"[{"_id": "e1", "description": null}]"#,
            &schema,
            RandomTokens,
        )
        .unwrap();
        assert_eq!(outcome.report.warnings.len(), 1);
        assert!(validate_document(r#"{"_id": "e1"}"#, &schema, RandomTokens).is_err());
    }
}
