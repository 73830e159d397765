use serde::{Deserialize, Serialize};

use super::GenericItem;
use crate::error::EntityKitError;

/// Relationship types supported by the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipType {
    /// Source is derived from the target
    Child,
    /// Target is derived from the source
    Parent,
    /// Undirected reference
    General,
}

impl std::fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelationshipType::Child => write!(f, "child"),
            RelationshipType::Parent => write!(f, "parent"),
            RelationshipType::General => write!(f, "general"),
        }
    }
}

impl std::str::FromStr for RelationshipType {
    type Err = EntityKitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "child" => Ok(RelationshipType::Child),
            "parent" => Ok(RelationshipType::Parent),
            "general" => Ok(RelationshipType::General),
            _ => Err(EntityKitError::InvalidRelationshipType(s.to_string())),
        }
    }
}

/// A directed, typed link between two entities
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub source: GenericItem,
    pub target: GenericItem,
    #[serde(rename = "type")]
    pub relationship_type: RelationshipType,
}

impl Relationship {
    pub fn new(source: GenericItem, target: GenericItem, relationship_type: RelationshipType) -> Self {
        Self {
            source,
            target,
            relationship_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationship_type_parse() {
        assert_eq!("child".parse::<RelationshipType>().unwrap(), RelationshipType::Child);
        assert_eq!("Parent".parse::<RelationshipType>().unwrap(), RelationshipType::Parent);
        assert!("sibling".parse::<RelationshipType>().is_err());
    }

    #[test]
    fn test_relationship_wire_format() {
        let rel = Relationship::new(
            GenericItem::new("e1", "Source"),
            GenericItem::new("e2", "Target"),
            RelationshipType::Child,
        );
        let json = serde_json::to_value(&rel).unwrap();
        assert_eq!(json["type"], "child");
        assert_eq!(json["target"]["_id"], "e2");
        assert_eq!(json["source"]["name"], "Source");
    }
}
