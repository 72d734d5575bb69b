//! Error types for serializable_db

use thiserror::Error;

/// Result type alias for serializable_db operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in serializable_db operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Key not found: {0}")]
    NotFound(String),

    #[error("Type mismatch for key {key}: expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: String,
        found: String,
    },

    #[error("Corruption detected: {0}")]
    Corruption(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// True when no record exists for the requested key
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// True when stored bytes could not be turned back into the requested value
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            Error::Serialization(_) | Error::TypeMismatch { .. } | Error::Corruption(_)
        )
    }
}
