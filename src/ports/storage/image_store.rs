use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::{errors::StorageResult, value_objects::ImageFilename};

/// Image bytes as read back from the store
#[derive(Debug, Clone)]
pub struct StoredImage {
    pub data: Bytes,
    pub content_type: Option<String>,
}

/// Port for the public image bucket.
/// This abstracts the actual storage backend (in-memory, local disk, S3)
#[async_trait]
pub trait ImageStore: Send + Sync + 'static {
    /// Store image data. Never overwrites: an existing name is an error
    async fn put_image(
        &self,
        filename: &ImageFilename,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<()>;

    /// Read image data back
    async fn get_image(&self, filename: &ImageFilename) -> StorageResult<StoredImage>;

    /// Delete image data
    async fn delete_image(&self, filename: &ImageFilename) -> StorageResult<()>;
}
