// Storage implementations
pub mod object_store_image_store;

// Provider-specific construction
pub mod s3;

// Re-export key types
pub use object_store_image_store::ObjectStoreImageStore;
pub use s3::{create_s3_store, S3Config};
