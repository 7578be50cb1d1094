//! # Schema Model
//!
//! In-memory representation of the web service schema document.
//!
//! The tree is `Api -> Service -> Action -> Param`. Decoding is all-or-nothing:
//! either the full tree is produced or an `AppError` is returned.

use crate::error::{AppError, AppResult};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// The decoded schema document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Api {
    /// Every service exposed by the remote API, in declaration order.
    #[serde(rename = "webServices")]
    pub services: Vec<Service>,
}

/// One exposed API surface, identified by its path.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Service {
    /// Slash-delimited hierarchical identifier, e.g. `api/user_groups`.
    pub path: String,
    /// Human readable description.
    #[serde(default)]
    pub description: String,
    /// Operations of the service, in declaration order.
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// One operation within a service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    /// Wire identifier, e.g. `search`.
    pub key: String,
    /// Human readable description.
    #[serde(default)]
    pub description: String,
    /// Whether the action is internal to the remote API.
    #[serde(default)]
    pub internal: bool,
    /// Whether the action expects a POST request.
    #[serde(default)]
    pub post: bool,
    /// Whether an example response is available upstream.
    #[serde(default)]
    pub has_response_example: bool,
    /// Input parameters, in declaration order.
    #[serde(default)]
    pub params: Vec<Param>,
}

/// One input field of an action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Param {
    /// Wire identifier, e.g. `organization`.
    pub key: String,
    /// Human readable description.
    #[serde(default)]
    pub description: String,
    /// Whether the parameter is internal to the remote API.
    #[serde(default)]
    pub internal: bool,
    /// Whether the parameter is mandatory.
    #[serde(default)]
    pub required: bool,
    /// Version since which the parameter is deprecated. Empty when it is not.
    #[serde(default)]
    pub deprecated_since: String,
}

impl Api {
    /// Decodes a schema document from raw bytes.
    pub fn from_slice(bytes: &[u8]) -> AppResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Decodes a schema document from a string.
    pub fn from_json(json: &str) -> AppResult<Self> {
        Self::from_slice(json.as_bytes())
    }
}

/// Reads and decodes the schema file at `path`.
///
/// # Errors
///
/// * `AppError::SchemaRead` if the file cannot be read.
/// * `AppError::SchemaDecode` if the content is not a valid schema document.
pub fn load_schema(path: &Path) -> AppResult<Api> {
    let bytes = fs::read(path).map_err(|source| AppError::SchemaRead {
        path: path.to_path_buf(),
        source,
    })?;
    Api::from_slice(&bytes)
}
