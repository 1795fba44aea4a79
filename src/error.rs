//! Error types for content-blocks.
//!
//! Rendering and URL handling never fail; the only fallible step is turning
//! the stored document text into a [`ContentDocument`](crate::block::ContentDocument).

use thiserror::Error;

/// Errors that can occur while loading a content document.
#[derive(Debug, Error)]
pub enum BlocksError {
    /// The stored text is not valid JSON or does not have the document shape
    #[error("invalid content document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The stored text is valid JSON but not an object (or `null`)
    #[error("content document must be a JSON object, found {found}")]
    NotAnObject {
        /// JSON type name of the value that was found
        found: &'static str,
    },
}

/// Result type alias for document loading.
pub type BlocksResult<T> = Result<T, BlocksError>;

impl BlocksError {
    /// Create a shape error from the offending JSON value.
    pub fn not_an_object(value: &serde_json::Value) -> Self {
        let found = match value {
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "boolean",
            serde_json::Value::Number(_) => "number",
            serde_json::Value::String(_) => "string",
            serde_json::Value::Array(_) => "array",
            serde_json::Value::Object(_) => "object",
        };
        Self::NotAnObject { found }
    }
}
