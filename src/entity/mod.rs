mod attribute;
mod history;
mod relationship;

pub use attribute::{Attribute, Value, ValueType};
pub use history::HistoryEntry;
pub use relationship::{Relationship, RelationshipType};

use serde::{Deserialize, Serialize};

/// Minimal `{_id, name}` reference used by relationships and attachments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

impl GenericItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// An Entity as it appears in a collection export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "_id")]
    pub id: String,
    pub timestamp: String,
    pub name: String,
    pub created: String,
    pub archived: bool,
    pub description: Option<String>,
    pub owner: String,
    pub projects: Vec<String>,
    pub relationships: Vec<Relationship>,
    pub attributes: Vec<Attribute>,
    pub attachments: Vec<GenericItem>,
    pub history: Vec<HistoryEntry>,
}

impl Entity {
    pub fn new(id: String, name: String, owner: String, created: String) -> Self {
        Self {
            id,
            timestamp: created.clone(),
            name,
            created,
            archived: false,
            description: Some(String::new()),
            owner,
            projects: Vec::new(),
            relationships: Vec::new(),
            attributes: Vec::new(),
            attachments: Vec::new(),
            history: Vec::new(),
        }
    }
}
