pub mod auth;
pub mod repositories;
pub mod services;
pub mod storage;

// Re-export all port traits for convenience
pub use auth::IdentityProvider;
pub use repositories::CatalogRepository;
pub use services::{CatalogService, GalleryUploader};
pub use storage::ImageStore;
