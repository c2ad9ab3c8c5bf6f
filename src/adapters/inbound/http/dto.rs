use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::{
    errors::{AuthError, CatalogError, StorageError},
    models::{GalleryImage, ListingDetail, Tractor},
};

/// DTO for one label/value line of the specification table
#[derive(Debug, Clone, Serialize)]
pub struct SpecificationDto {
    pub label: String,
    pub value: String,
}

/// DTO for the product detail endpoint
#[derive(Debug, Clone, Serialize)]
pub struct TractorDetailDto {
    #[serde(flatten)]
    pub tractor: Tractor,
    pub formatted_price: String,
    pub contact_link: String,
    /// Public URLs, main image first
    pub images: Vec<String>,
    pub gallery: Vec<GalleryImage>,
    pub specifications: Vec<SpecificationDto>,
}

/// DTO for the admin listing endpoint
#[derive(Debug, Clone, Serialize)]
pub struct AdminTractorDto {
    #[serde(flatten)]
    pub tractor: Tractor,
    pub image_public_url: String,
    pub formatted_price: String,
}

/// Query for the product detail page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailQueryDto {
    pub image: Option<usize>,
    pub lightbox: Option<bool>,
}

/// Query for the admin dashboard
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminQueryDto {
    pub edit: Option<Uuid>,
}

/// Body of the delete form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteConfirmationDto {
    pub confirm: Option<String>,
}

impl DeleteConfirmationDto {
    pub fn is_confirmed(&self) -> bool {
        self.confirm.as_deref() == Some("true")
    }
}

/// DTO for the health check
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponseDto {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

/// DTO for error responses
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponseDto {
    pub error: String,
    pub message: String,
    pub details: Option<HashMap<String, serde_json::Value>>,
    pub timestamp: DateTime<Utc>,
}

impl From<ListingDetail> for TractorDetailDto {
    fn from(detail: ListingDetail) -> Self {
        let specifications = detail
            .tractor
            .specifications()
            .into_iter()
            .map(|(label, value)| SpecificationDto {
                label: label.to_string(),
                value,
            })
            .collect();

        TractorDetailDto {
            images: detail.carousel.images().to_vec(),
            formatted_price: detail.formatted_price,
            contact_link: detail.contact_link,
            gallery: detail.gallery,
            specifications,
            tractor: detail.tractor,
        }
    }
}

impl ErrorResponseDto {
    pub fn from_catalog_error(error: &CatalogError) -> Self {
        let mut details = HashMap::new();

        let kind = match error {
            CatalogError::Validation(_) => "ValidationError",
            CatalogError::TractorNotFound { id } => {
                details.insert("id".to_string(), serde_json::Value::String(id.to_string()));
                "NotFound"
            }
            CatalogError::GalleryImageNotFound { id } => {
                details.insert("id".to_string(), serde_json::Value::String(id.to_string()));
                "NotFound"
            }
            CatalogError::ConfirmationRequired => "BadRequest",
            CatalogError::Storage(_) => "StorageError",
            CatalogError::Repository(_) => "RepositoryError",
            CatalogError::Auth(_) => "AuthError",
            CatalogError::GalleryUpload { tractor_id, .. } => {
                details.insert(
                    "tractor_id".to_string(),
                    serde_json::Value::String(tractor_id.to_string()),
                );
                "GalleryUploadError"
            }
        };

        ErrorResponseDto {
            error: kind.to_string(),
            message: error.to_string(),
            details: if details.is_empty() {
                None
            } else {
                Some(details)
            },
            timestamp: Utc::now(),
        }
    }

    pub fn unauthorized(message: &str) -> Self {
        ErrorResponseDto {
            error: "Unauthorized".to_string(),
            message: message.to_string(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    pub fn internal_error(message: &str) -> Self {
        ErrorResponseDto {
            error: "InternalServerError".to_string(),
            message: message.to_string(),
            details: None,
            timestamp: Utc::now(),
        }
    }
}

impl HealthResponseDto {
    pub fn ok() -> Self {
        HealthResponseDto {
            status: "ok".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Convert CatalogError to HTTP status codes for API and page responses
impl From<&CatalogError> for StatusCode {
    fn from(err: &CatalogError) -> Self {
        match err {
            CatalogError::Validation(_)
            | CatalogError::Storage(StorageError::InvalidUpload { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            CatalogError::TractorNotFound { .. } | CatalogError::GalleryImageNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            CatalogError::ConfirmationRequired => StatusCode::BAD_REQUEST,
            CatalogError::Auth(AuthError::InvalidCredentials | AuthError::SessionExpired) => {
                StatusCode::UNAUTHORIZED
            }
            CatalogError::Storage(_)
            | CatalogError::Repository(_)
            | CatalogError::Auth(_)
            | CatalogError::GalleryUpload { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
