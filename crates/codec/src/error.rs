use flora_core::ValidationError;
use thiserror::Error;

/// Structured-format import failed. The whole import is aborted.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The document is not valid JSON or does not match the record schema.
    #[error("malformed structured document: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A record deserialised but one of its fields failed validation.
    #[error("record {index} rejected")]
    InvalidRecord {
        index: usize,
        #[source]
        source: ValidationError,
    },
}
