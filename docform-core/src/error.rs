//! Error types and result types for document adapter operations.
//!
//! Use [`DocumentResult<T>`] as the return type for fallible operations.

use bson::error::Error as BsonError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible errors that can occur when adapting a document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// A value outside the set of JSON-encodable shapes was handed to the JSON hook.
    /// Carries the offending type name and the value's string representation.
    #[error("Could not JSON-encode type '{type_name}': {repr}")]
    UnsupportedType {
        /// Name of the rejected value's type.
        type_name: String,
        /// String representation of the rejected value.
        repr: String,
    },
    /// Serialization/deserialization error when reading document values (BSON, JSON).
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// The document's field declarations do not match its serialized shape.
    #[error("Invalid declaration: {0}")]
    InvalidDeclaration(String),
}

impl DocumentError {
    pub(crate) fn unsupported(type_name: impl Into<String>, repr: impl Into<String>) -> Self {
        DocumentError::UnsupportedType {
            type_name: type_name.into(),
            repr: repr.into(),
        }
    }
}

/// A specialized `Result` type for document adapter operations.
pub type DocumentResult<T> = Result<T, DocumentError>;

impl From<BsonError> for DocumentError {
    fn from(err: BsonError) -> Self {
        DocumentError::Serialization(err.to_string())
    }
}

impl From<SerdeJsonError> for DocumentError {
    fn from(err: SerdeJsonError) -> Self {
        DocumentError::Serialization(err.to_string())
    }
}
