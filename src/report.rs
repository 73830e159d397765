//! Issues and warnings collected while checking a collection.
//!
//! An [`Issue`] is a schema violation that was left in place. A [`Warning`]
//! is an anomaly that was repaired. Both carry the identifier of the entity
//! they belong to.

use serde::{Deserialize, Serialize};

/// A schema violation that was not repaired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "_id")]
    pub id: String,
    pub message: String,
}

/// An anomaly that was repaired in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    #[serde(rename = "_id")]
    pub id: String,
    pub message: String,
}

/// Everything found during one validation pass, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub issues: Vec<Issue>,
    pub warnings: Vec<Warning>,
}

impl Report {
    /// Record an issue against entity `id`
    pub fn issue(&mut self, id: &str, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(entity = id, "{}", message);
        self.issues.push(Issue {
            id: id.to_string(),
            message,
        });
    }

    /// Record a repaired anomaly against entity `id`
    pub fn warning(&mut self, id: &str, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(entity = id, repaired = true, "{}", message);
        self.warnings.push(Warning {
            id: id.to_string(),
            message,
        });
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty() && self.warnings.is_empty()
    }

    /// Issues recorded against one entity
    pub fn issues_for<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Issue> + 'a {
        self.issues.iter().filter(move |issue| issue.id == id)
    }

    pub fn summary(&self) -> String {
        format!("{} issues, {} warnings", self.issues.len(), self.warnings.len())
    }
}

/// Format an issue for display.
pub fn format_issue(issue: &Issue) -> String {
    format!("Issue: {} - {}", issue.id, issue.message)
}

/// Format a warning for display.
pub fn format_warning(warning: &Warning) -> String {
    format!("Warning: {} - {} (repaired)", warning.id, warning.message)
}
