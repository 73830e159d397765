// src/validate/history.rs
use serde_json::Value;

use super::{EntityContext, Validator};
use crate::error::Result;
use crate::record::{backfill, format_fields, missing_fields, repair_null_description};
use crate::report::Report;
use crate::tokens::{self, TokenSource};

impl<T: TokenSource> Validator<'_, T> {
    /// Check one history entry of the entity `id`.
    ///
    /// Absent `_id`, `name`, `created` and `attachments` are copied from the
    /// entity and an absent `version` gets a fresh token. Attributes inside
    /// the snapshot take their `timestamp` from the entry itself.
    pub(super) fn validate_history(
        &mut self,
        id: &str,
        position: usize,
        entry: &mut Value,
        entity: &EntityContext,
        report: &mut Report,
    ) -> Result<()> {
        let Some(entry) = entry.as_object_mut() else {
            report.issue(id, format!("History {position} is not an object"));
            return Ok(());
        };

        let missing = missing_fields(entry, &self.schema.history);
        if !missing.is_empty() {
            report.issue(
                id,
                format!(
                    "History {position} missing {} fields: {}",
                    missing.len(),
                    format_fields(&missing)
                ),
            );

            for field in &missing {
                let repaired = match field.as_str() {
                    "_id" => backfill(entry, field, entity.id.as_ref()),
                    "name" => backfill(entry, field, entity.name.as_ref()),
                    "created" => backfill(entry, field, entity.created.as_ref()),
                    "attachments" => backfill(entry, field, entity.attachments.as_ref()),
                    "version" => {
                        let version = tokens::version(&mut self.tokens)?;
                        backfill(entry, field, Some(&Value::String(version)))
                    }
                    _ => false,
                };
                if repaired {
                    tracing::debug!(entity = id, history = position, field = %field, "backfilled history field");
                }
            }
        }

        if repair_null_description(entry) {
            report.warning(id, format!("History {position} description is \"null\""));
        }

        let timestamp = entry.get("timestamp").cloned();
        if let Some(Value::Array(attributes)) = entry.get_mut("attributes") {
            let scope = format!("History {position} attribute");
            for (index, attribute) in attributes.iter_mut().enumerate() {
                self.validate_attribute(
                    id,
                    &scope,
                    index,
                    attribute,
                    entity.owner.as_ref(),
                    timestamp.as_ref(),
                    report,
                );
            }
        }

        Ok(())
    }
}
