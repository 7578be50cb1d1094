//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! Errors fall into two groups. Schema acquisition errors (`SchemaRead`,
//! `SchemaDecode`) abort the whole run. Everything else is raised while
//! producing a single output unit and is recorded against that endpoint.

use derive_more::{Display, From};
use std::path::PathBuf;

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// The schema file could not be read.
    #[from(ignore)]
    #[display("Unable to read schema file {}: {source}", path.display())]
    SchemaRead {
        /// Location of the schema file.
        path: PathBuf,
        /// Underlying IO failure.
        source: std::io::Error,
    },

    /// The schema content does not match the expected shape.
    #[display("Unable to decode schema: {_0}")]
    SchemaDecode(serde_json::Error),

    /// An output unit could not be written.
    #[from(ignore)]
    #[display("Unable to write {}: {source}", path.display())]
    OutputWrite {
        /// Destination of the output unit.
        path: PathBuf,
        /// Underlying IO failure.
        source: std::io::Error,
    },

    /// Two keys derive the same identifier inside one generated scope.
    #[from(ignore)]
    #[display("Name collision in {scope}: keys {} all derive `{name}`", keys.join(", "))]
    NameCollision {
        /// The record (or unit) in which the collision occurs.
        scope: String,
        /// The identifier derived by every colliding key.
        name: String,
        /// The original keys, in declaration order.
        keys: Vec<String>,
    },

    /// A key cannot be turned into a Rust identifier.
    #[from(ignore)]
    #[display("Key `{key}` cannot be used as an identifier: {reason}")]
    InvalidIdentifier {
        /// The original key.
        key: String,
        /// Why the conversion failed.
        reason: String,
    },

    /// Rendered source text failed to parse.
    #[from(ignore)]
    #[display("Generated code is not valid Rust: {_0}")]
    InvalidOutput(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

impl AppError {
    /// Returns `true` when the error must abort the whole generation run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::SchemaRead { .. } | AppError::SchemaDecode(_))
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::SchemaRead { source, .. } | AppError::OutputWrite { source, .. } => {
                Some(source)
            }
            AppError::SchemaDecode(e) => Some(e),
            _ => None,
        }
    }
}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
