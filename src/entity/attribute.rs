// src/entity/attribute.rs
use serde::{Deserialize, Serialize};

/// Declared type of a Value, which decides the shape of its `data`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Number,
    Text,
    Url,
    Date,
    Entity,
    Select,
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueType::Number => write!(f, "number"),
            ValueType::Text => write!(f, "text"),
            ValueType::Url => write!(f, "url"),
            ValueType::Date => write!(f, "date"),
            ValueType::Entity => write!(f, "entity"),
            ValueType::Select => write!(f, "select"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Value {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    pub data: serde_json::Value,
}

impl Value {
    pub fn new(id: String, name: impl Into<String>, value_type: ValueType, data: serde_json::Value) -> Self {
        Self {
            id,
            name: name.into(),
            value_type,
            data,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(rename = "_id")]
    pub id: String,
    pub timestamp: String,
    pub name: String,
    pub archived: bool,
    pub description: String,
    pub owner: String,
    pub values: Vec<Value>,
}
