use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{EntityKitError, Result};

/// Required field names for each record level of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schema {
    /// Fields every entity must carry
    pub entity: Vec<String>,
    /// Fields every history entry must carry
    pub history: Vec<String>,
    /// Fields every attribute (top level or inside history) must carry
    pub attribute: Vec<String>,
    /// Fields every attribute value must carry
    pub value: Vec<String>,
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            entity: fields(&[
                "_id",
                "timestamp",
                "created",
                "name",
                "archived",
                "description",
                "owner",
                "projects",
                "relationships",
                "attributes",
                "attachments",
                "history",
            ]),
            history: fields(&[
                "_id",
                "timestamp",
                "version",
                "created",
                "name",
                "archived",
                "description",
                "owner",
                "projects",
                "relationships",
                "attributes",
                "attachments",
            ]),
            attribute: fields(&[
                "_id",
                "timestamp",
                "name",
                "archived",
                "description",
                "owner",
                "values",
            ]),
            value: fields(&["_id", "name", "type", "data"]),
        }
    }
}

fn fields(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// Settings for a validation run. Every field may come from a config file
/// and be overridden on the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Collection export to read
    pub input: Option<PathBuf>,
    /// Where the repaired collection is written
    pub output: Option<PathBuf>,
    /// Write the repaired collection at all
    pub generate_output: bool,
    pub schema: Schema,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            generate_output: true,
            schema: Schema::default(),
        }
    }
}

impl Config {
    /// Load a config file. `.yaml`/`.yml` files are read as YAML, anything
    /// else as JSON. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let is_yaml = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yaml") | Some("yml")
        );
        let config = if is_yaml {
            serde_yaml::from_str(&text)?
        } else {
            serde_json::from_str(&text)?
        };
        Ok(config)
    }

    /// Input path, or an error when neither the file nor the CLI set one.
    pub fn input_path(&self) -> Result<&Path> {
        self.input.as_deref().ok_or(EntityKitError::MissingInput)
    }

    /// Output path when output is enabled and a path is configured.
    pub fn output_path(&self) -> Option<&Path> {
        if self.generate_output {
            self.output.as_deref()
        } else {
            None
        }
    }
}
