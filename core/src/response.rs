//! # Response Examples
//!
//! Decoding of the response-example envelope published by the remote API.
//! Only the key extraction is provided; nothing here performs network access.

use crate::error::{AppError, AppResult};
use serde::Deserialize;

/// Envelope returned by the upstream `response_example` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResponseExample {
    /// Format of `example`, usually `json`.
    #[serde(default)]
    pub format: String,
    /// The example payload, embedded as text.
    pub example: String,
}

impl ResponseExample {
    /// Decodes an envelope from its JSON text.
    pub fn from_json(json: &str) -> AppResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| AppError::General(format!("Invalid response example envelope: {}", e)))
    }

    /// Returns the top-level keys of the example payload in document order.
    ///
    /// # Errors
    ///
    /// Returns `AppError::General` if the payload is not a JSON object.
    pub fn keys(&self) -> AppResult<Vec<String>> {
        let value: serde_json::Value = serde_json::from_str(&self.example)
            .map_err(|e| AppError::General(format!("Invalid response example: {}", e)))?;

        match value {
            serde_json::Value::Object(map) => Ok(map.keys().cloned().collect()),
            _ => Err(AppError::General(
                "Response example is not a JSON object".into(),
            )),
        }
    }
}
