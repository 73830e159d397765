// src/entity/history.rs
use serde::{Deserialize, Serialize};

use super::{Attribute, Entity, GenericItem, Relationship};

/// Snapshot of an entity's mutable fields at a prior version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Change author identifier
    #[serde(default)]
    pub author: String,
    /// Change message
    #[serde(default)]
    pub message: String,
    pub version: String,
    pub timestamp: String,

    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub owner: String,
    pub archived: bool,
    pub created: String,
    pub description: Option<String>,
    pub projects: Vec<String>,
    pub relationships: Vec<Relationship>,
    pub attributes: Vec<Attribute>,
    pub attachments: Vec<GenericItem>,
}

impl HistoryEntry {
    /// Capture the current state of `entity` under `version`
    pub fn snapshot(entity: &Entity, version: String, timestamp: String) -> Self {
        Self {
            author: String::new(),
            message: String::new(),
            version,
            timestamp,
            id: entity.id.clone(),
            name: entity.name.clone(),
            owner: entity.owner.clone(),
            archived: entity.archived,
            created: entity.created.clone(),
            description: entity.description.clone(),
            projects: entity.projects.clone(),
            relationships: entity.relationships.clone(),
            attributes: entity.attributes.clone(),
            attachments: entity.attachments.clone(),
        }
    }
}
