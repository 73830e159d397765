// src/validate/attribute.rs
use serde_json::Value;

use super::Validator;
use crate::record::{backfill, format_fields, missing_fields, record_label};
use crate::report::Report;
use crate::tokens::TokenSource;

impl<T: TokenSource> Validator<'_, T> {
    /// Check one attribute and its values.
    ///
    /// `scope` prefixes messages (`Attribute`, `History 0 attribute`).
    /// Absent `owner`, `archived` and `timestamp` are filled from `owner`,
    /// `false` and `timestamp`; value gaps are only reported. For top-level
    /// attributes `timestamp` is the entity's `timestamp`, or its `created`
    /// when the entity has none; history attributes get the entry's own.
    /// A `values` field that is present but not an array is reported and left
    /// as it is.
    #[allow(clippy::too_many_arguments)]
    pub(super) fn validate_attribute(
        &self,
        id: &str,
        scope: &str,
        position: usize,
        attribute: &mut Value,
        owner: Option<&Value>,
        timestamp: Option<&Value>,
        report: &mut Report,
    ) {
        let Some(attribute) = attribute.as_object_mut() else {
            report.issue(id, format!("{scope} {position} is not an object"));
            return;
        };
        let label = record_label(attribute, position);

        let missing = missing_fields(attribute, &self.schema.attribute);
        if !missing.is_empty() {
            report.issue(
                id,
                format!(
                    "{scope} {label} missing {} fields: {}",
                    missing.len(),
                    format_fields(&missing)
                ),
            );

            for field in &missing {
                let repaired = match field.as_str() {
                    "owner" => backfill(attribute, field, owner),
                    "archived" => backfill(attribute, field, Some(&Value::Bool(false))),
                    "timestamp" => backfill(attribute, field, timestamp),
                    _ => false,
                };
                if repaired {
                    tracing::debug!(entity = id, attribute = %label, field = %field, "backfilled attribute field");
                }
            }
        }

        let values = match attribute.get("values") {
            Some(Value::Array(values)) => values,
            None | Some(Value::Null) => return,
            Some(_) => {
                report.issue(id, format!("{scope} {label} values is not an array"));
                return;
            }
        };
        for (index, value) in values.iter().enumerate() {
            let Some(value) = value.as_object() else {
                report.issue(id, format!("{scope} {label} value {index} is not an object"));
                continue;
            };
            let missing = missing_fields(value, &self.schema.value);
            if !missing.is_empty() {
                report.issue(
                    id,
                    format!(
                        "{scope} {label} value {} missing {} fields: {}",
                        record_label(value, index),
                        missing.len(),
                        format_fields(&missing)
                    ),
                );
            }
        }
    }
}
