use thiserror::Error;
use uuid::Uuid;

use super::{AuthError, RepositoryError, StorageError, ValidationError};

/// Errors surfaced by the catalog and admin services
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Tractor not found: {id}")]
    TractorNotFound { id: Uuid },

    #[error("Gallery image not found: {id}")]
    GalleryImageNotFound { id: Uuid },

    #[error("Deleting a listing requires confirmation")]
    ConfirmationRequired,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// The tractor row was saved but its new gallery images were not
    #[error("Tractor {tractor_id} saved but gallery upload failed: {source}")]
    GalleryUpload {
        tractor_id: Uuid,
        source: StorageError,
    },
}

impl CatalogError {
    /// True for the errors caused by form input rather than a backend
    pub fn is_validation(&self) -> bool {
        matches!(self, CatalogError::Validation(_))
    }
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
