use thiserror::Error;

#[derive(Error, Debug)]
pub enum EntityKitError {
    #[error("Not a collection: {0}")]
    NotACollection(String),

    #[error("No input collection given. Pass a path or set `input` in the config file.")]
    MissingInput,

    #[error("Invalid token alphabet: {0}")]
    InvalidAlphabet(String),

    #[error("Entropy error: {0}")]
    Entropy(String),

    #[error("Invalid relationship type: {0}")]
    InvalidRelationshipType(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, EntityKitError>;
