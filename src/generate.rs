// src/generate.rs
//! Synthetic entity generation for load and regression testing.

use chrono::{SecondsFormat, Utc};
use serde_json::json;

use crate::entity::{Attribute, Entity, HistoryEntry, Value, ValueType};
use crate::error::Result;
use crate::tokens::{self, TokenSource};

const DESCRIPTIONS: [&str; 3] = ["eggs", "bacon and eggs", "coffee"];
const CHARACTERS: [&str; 3] = ["spongebob", "squidward", "patrick"];
const BOX_URL: &str = "https://box.wustl.edu";

#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Number of entities to create
    pub count: usize,
    /// Owner identifier stamped on every record
    pub owner: String,
    /// Creation timestamp stamped on every record
    pub created: String,
    /// Give each entity one history snapshot of itself
    pub history: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            count: 3,
            owner: "0000-0002-3481-952X".to_string(),
            created: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            history: false,
        }
    }
}

/// Build `options.count` entities, drawing identifiers from `tokens`.
pub fn generate_entities<T: TokenSource>(options: &GeneratorOptions, mut tokens: T) -> Result<Vec<Entity>> {
    let mut entities = Vec::with_capacity(options.count);

    for i in 0..options.count {
        let id = tokens::identifier(&mut tokens, "entity")?;
        let mut entity = Entity::new(
            id,
            format!("Entity A - {}", i + 1),
            options.owner.clone(),
            options.created.clone(),
        );
        entity.description = Some(DESCRIPTIONS[i % DESCRIPTIONS.len()].to_string());

        entity.attributes.push(Attribute {
            id: tokens::identifier(&mut tokens, "attribute")?,
            timestamp: options.created.clone(),
            name: "Test Attribute".to_string(),
            archived: false,
            description: "An example attribute.".to_string(),
            owner: options.owner.clone(),
            values: vec![Value::new(
                tokens::identifier(&mut tokens, "value")?,
                "Spongebob Character",
                ValueType::Text,
                json!(CHARACTERS[i % CHARACTERS.len()]),
            )],
        });
        entity.attributes.push(Attribute {
            id: tokens::identifier(&mut tokens, "attribute")?,
            timestamp: options.created.clone(),
            name: "Test Attribute 2".to_string(),
            archived: false,
            description: "Another example attribute.".to_string(),
            owner: options.owner.clone(),
            values: vec![
                Value::new(tokens::identifier(&mut tokens, "value")?, "Count", ValueType::Number, json!(i)),
                Value::new(tokens::identifier(&mut tokens, "value")?, "Box", ValueType::Url, json!(BOX_URL)),
            ],
        });

        if options.history {
            let version = tokens::version(&mut tokens)?;
            let snapshot = HistoryEntry::snapshot(&entity, version, options.created.clone());
            entity.history.push(snapshot);
        }

        entities.push(entity);
    }

    tracing::info!(entities = entities.len(), "generated entities");
    Ok(entities)
}

/// Generate entities as a loosely-typed collection, ready to be written or
/// validated.
pub fn generate_collection<T: TokenSource>(
    options: &GeneratorOptions,
    tokens: T,
) -> Result<Vec<serde_json::Value>> {
    generate_entities(options, tokens)?
        .into_iter()
        .map(|entity| serde_json::to_value(entity).map_err(Into::into))
        .collect()
}
