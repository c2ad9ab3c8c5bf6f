use async_trait::async_trait;
use futures::future::try_join_all;
use tracing::warn;

use crate::{
    domain::{errors::StorageResult, models::StagedImage, value_objects::ImageFilename},
    ports::services::GalleryUploader,
    services::ImageGateway,
};

/// Uploads every file concurrently and fails the whole batch if any upload
/// fails. Files that did upload before the failure stay in storage.
#[derive(Clone)]
pub struct AllOrNothingGalleryUploader {
    images: ImageGateway,
}

impl AllOrNothingGalleryUploader {
    pub fn new(images: ImageGateway) -> Self {
        Self { images }
    }
}

#[async_trait]
impl GalleryUploader for AllOrNothingGalleryUploader {
    async fn upload_batch(&self, files: &[StagedImage]) -> StorageResult<Vec<ImageFilename>> {
        try_join_all(files.iter().map(|file| self.images.upload(file)))
            .await
            .map_err(|e| {
                warn!(files = files.len(), error = %e, "Gallery batch upload failed");
                e
            })
    }
}
