use crate::domain::value_objects::ImageFilename;

/// Errors that can occur while talking to the image store
#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// Image not found
    ObjectNotFound { filename: ImageFilename },

    /// Image already exists (uploads never overwrite)
    ObjectAlreadyExists { filename: ImageFilename },

    /// Access denied by the backing store
    AccessDenied {
        filename: ImageFilename,
        operation: String,
    },

    /// Upload refused before reaching the store
    InvalidUpload { reason: String },

    /// Infrastructure error with external source
    InfrastructureError {
        message: String,
        source: Option<String>, // Store error as string to allow Clone
    },
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::ObjectNotFound { filename } => {
                write!(f, "Image not found: {}", filename)
            }
            StorageError::ObjectAlreadyExists { filename } => {
                write!(f, "Image already exists: {}", filename)
            }
            StorageError::AccessDenied {
                filename,
                operation,
            } => {
                write!(
                    f,
                    "Access denied for operation '{}' on image: {}",
                    operation, filename
                )
            }
            StorageError::InvalidUpload { reason } => {
                write!(f, "Invalid upload: {}", reason)
            }
            StorageError::InfrastructureError { message, .. } => {
                write!(f, "Infrastructure error: {}", message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
