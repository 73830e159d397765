pub mod cli;
pub mod collection;
pub mod config;
pub mod entity;
pub mod error;
pub mod generate;
pub mod logging;
pub mod migrate;
pub mod report;
pub mod tokens;
pub mod validate;

mod record;

pub use config::{Config, Schema};
pub use error::{EntityKitError, Result};
pub use report::{Issue, Report, Warning};
pub use tokens::{RandomTokens, SequenceTokens, TokenSource};
pub use validate::{validate_document, ValidationOutcome, Validator};
