use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::{
    domain::{
        errors::{StorageError, StorageResult},
        models::{RemovalReport, StagedImage},
        value_objects::ImageFilename,
    },
    ports::storage::{ImageStore, StoredImage},
};

/// Default upload limit, matching the admin form hint ("até 10MB")
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Gateway over the public image bucket: naming, public URLs and cleanup
#[derive(Clone)]
pub struct ImageGateway {
    store: Arc<dyn ImageStore>,
    public_base_url: String,
    max_upload_bytes: usize,
}

impl ImageGateway {
    pub fn new(store: Arc<dyn ImageStore>, public_base_url: impl Into<String>) -> Self {
        let public_base_url = public_base_url.into().trim_end_matches('/').to_string();
        Self {
            store,
            public_base_url,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    /// Upload under a fresh random name and return that name.
    ///
    /// Writes never overwrite, so a name collision fails the upload. There is
    /// no retry.
    pub async fn upload(&self, image: &StagedImage) -> StorageResult<ImageFilename> {
        image
            .validate(self.max_upload_bytes)
            .map_err(|e| StorageError::InvalidUpload {
                reason: e.to_string(),
            })?;

        let filename = ImageFilename::generate(&image.file_name);

        self.store
            .put_image(&filename, image.data.clone(), &image.content_type)
            .await?;

        info!(
            original = %image.file_name,
            filename = %filename,
            size = image.data.len(),
            "Uploaded image"
        );

        Ok(filename)
    }

    /// Public URL of a stored image. Pure string concatenation, no existence check
    pub fn public_url(&self, filename: &ImageFilename) -> String {
        format!("{}/{}", self.public_base_url, filename)
    }

    /// Read an image back, for backends without their own public URL
    pub async fn fetch(&self, filename: &ImageFilename) -> StorageResult<StoredImage> {
        self.store.get_image(filename).await
    }

    /// Best-effort removal. Failures are logged and reported, never returned
    pub async fn remove(&self, filenames: &[ImageFilename]) -> RemovalReport {
        let results = join_all(filenames.iter().map(|filename| async move {
            match self.store.delete_image(filename).await {
                // Already gone is as good as removed
                Err(StorageError::ObjectNotFound { .. }) => Ok(()),
                other => other,
            }
        }))
        .await;

        let mut report = RemovalReport::default();
        for (filename, result) in filenames.iter().cloned().zip(results) {
            match &result {
                Ok(()) => debug!(filename = %filename, "Removed image"),
                Err(e) => warn!(filename = %filename, error = %e, "Failed to remove image"),
            }
            report.record(filename, result);
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::storage::ObjectStoreImageStore;
    use object_store::memory::InMemory;

    fn gateway() -> ImageGateway {
        let store = Arc::new(ObjectStoreImageStore::new(Arc::new(InMemory::new())));
        ImageGateway::new(store, "https://cdn.example.com/tractor-images/")
    }

    #[tokio::test]
    async fn test_upload_generates_name_with_extension() {
        let gateway = gateway();
        let image = StagedImage::new("Foto Trator.JPG", "image/jpeg", vec![1u8, 2, 3]);

        let filename = gateway.upload(&image).await.unwrap();

        assert!(filename.as_str().ends_with(".JPG"));
        assert!(filename.as_str().len() >= 14);
        assert!(!filename.as_str().contains('/'));

        let stored = gateway.fetch(&filename).await.unwrap();
        assert_eq!(stored.data.as_ref(), &[1u8, 2, 3]);
        assert_eq!(stored.content_type.as_deref(), Some("image/jpeg"));
    }

    #[tokio::test]
    async fn test_upload_rejects_non_images_and_large_files() {
        let gateway = gateway().with_max_upload_bytes(2);

        let text = StagedImage::new("notes.txt", "text/plain", "hi");
        assert!(matches!(
            gateway.upload(&text).await,
            Err(StorageError::InvalidUpload { .. })
        ));

        let large = StagedImage::new("a.png", "image/png", vec![0u8; 3]);
        assert!(matches!(
            gateway.upload(&large).await,
            Err(StorageError::InvalidUpload { .. })
        ));
    }

    #[test]
    fn test_public_url_trims_trailing_slash() {
        let filename = ImageFilename::new("k3j9x0a1b2.png".to_string()).unwrap();
        assert_eq!(
            gateway().public_url(&filename),
            "https://cdn.example.com/tractor-images/k3j9x0a1b2.png"
        );
    }

    #[tokio::test]
    async fn test_remove_treats_missing_objects_as_removed() {
        let gateway = gateway();
        let stored = gateway
            .upload(&StagedImage::new("a.png", "image/png", vec![1u8]))
            .await
            .unwrap();
        let missing = ImageFilename::new("never-uploaded.png".to_string()).unwrap();

        let report = gateway.remove(&[stored.clone(), missing]).await;

        assert!(report.is_complete());
        assert_eq!(report.removed().count(), 2);
        assert!(gateway.fetch(&stored).await.is_err());
    }
}
