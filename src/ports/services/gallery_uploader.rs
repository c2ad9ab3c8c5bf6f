use async_trait::async_trait;

use crate::domain::{
    errors::StorageResult, models::StagedImage, value_objects::ImageFilename,
};

/// Port for uploading a batch of gallery files.
///
/// The returned filenames keep the order of `files`. Implementations decide
/// what happens to already uploaded files when one of the batch fails.
#[async_trait]
pub trait GalleryUploader: Send + Sync + 'static {
    async fn upload_batch(&self, files: &[StagedImage]) -> StorageResult<Vec<ImageFilename>>;
}
