use thiserror::Error;

/// Errors raised by catalog repository adapters
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Row could not be decoded: {message}")]
    Decode { message: String },
}

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;
