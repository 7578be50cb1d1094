#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use derive_more::{Display, From};
use wsgen_core::AppError;

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// The generation run could not start or complete.
    #[display("{}", _0)]
    Generation(AppError),

    /// Some endpoints could not be generated because of naming problems.
    #[from(ignore)]
    #[display("{} endpoint(s) could not be generated because of naming conflicts", _0)]
    Collisions(usize),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Generation(e) => Some(e),
            CliError::Collisions(_) => None,
        }
    }
}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;
