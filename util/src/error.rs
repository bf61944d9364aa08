//! Error types for fixture construction

use thiserror::Error;

/// Error type for utility operations
#[derive(Debug, Error)]
pub enum UtilError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Fixture parameters do not describe a layout that can be serialized
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Result type for utility operations
pub type UtilResult<T> = std::result::Result<T, UtilError>;
