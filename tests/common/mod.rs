#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use object_store::memory::InMemory;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tractor_catalog::{
    domain::{
        errors::{StorageError, StorageResult},
        models::{StagedImage, TractorForm},
        value_objects::{ImageFilename, PhoneNumber},
    },
    ports::storage::{ImageStore, StoredImage},
    AdminWorkflowBuilder, AllOrNothingGalleryUploader, ImageGateway, InMemoryCatalogRepository,
    ObjectStoreImageStore,
};

pub const PUBLIC_BASE_URL: &str = "https://cdn.example.com/tractor-images";
pub const CONTACT_PHONE: &str = "553597400527";

/// Bytes that TestImageStore refuses to store
pub const REJECTED_BYTES: &[u8] = b"rejected-by-store";

/// In-memory image store that fails on request and counts calls
pub struct TestImageStore {
    inner: ObjectStoreImageStore,
    fail_puts_of: Option<Bytes>,
    fail_deletes: bool,
    puts: AtomicUsize,
    deletes: AtomicUsize,
}

impl TestImageStore {
    pub fn new() -> Self {
        Self {
            inner: ObjectStoreImageStore::new(Arc::new(InMemory::new())),
            fail_puts_of: None,
            fail_deletes: false,
            puts: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
        }
    }

    /// Reject every upload whose content is REJECTED_BYTES
    pub fn rejecting_marked_uploads() -> Self {
        Self {
            fail_puts_of: Some(Bytes::from_static(REJECTED_BYTES)),
            ..Self::new()
        }
    }

    /// Fail every delete
    pub fn failing_deletes() -> Self {
        Self {
            fail_deletes: true,
            ..Self::new()
        }
    }

    /// Successful uploads so far
    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    /// Delete attempts so far
    pub fn delete_count(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    pub async fn contains(&self, filename: &ImageFilename) -> bool {
        self.inner.get_image(filename).await.is_ok()
    }
}

#[async_trait]
impl ImageStore for TestImageStore {
    async fn put_image(
        &self,
        filename: &ImageFilename,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<()> {
        if self.fail_puts_of.as_ref() == Some(&data) {
            return Err(StorageError::InfrastructureError {
                message: format!("upload of {} refused", filename),
                source: None,
            });
        }

        self.inner.put_image(filename, data, content_type).await?;
        self.puts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn get_image(&self, filename: &ImageFilename) -> StorageResult<StoredImage> {
        self.inner.get_image(filename).await
    }

    async fn delete_image(&self, filename: &ImageFilename) -> StorageResult<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if self.fail_deletes {
            return Err(StorageError::AccessDenied {
                filename: filename.clone(),
                operation: "delete".to_string(),
            });
        }
        self.inner.delete_image(filename).await
    }
}

/// Everything an admin workflow needs, wired over in-memory adapters
pub struct Harness {
    pub repository: Arc<InMemoryCatalogRepository>,
    pub store: Arc<TestImageStore>,
    pub images: ImageGateway,
    pub builder: AdminWorkflowBuilder,
}

pub fn harness() -> Harness {
    harness_with_store(TestImageStore::new())
}

pub fn harness_with_store(store: TestImageStore) -> Harness {
    let repository = Arc::new(InMemoryCatalogRepository::new());
    let store = Arc::new(store);
    let images = ImageGateway::new(store.clone(), PUBLIC_BASE_URL);

    let builder = AdminWorkflowBuilder::new()
        .repository(repository.clone())
        .images(images.clone())
        .gallery_uploader(Arc::new(AllOrNothingGalleryUploader::new(images.clone())))
        .contact_phone(PhoneNumber::new(CONTACT_PHONE.to_string()).unwrap());

    Harness {
        repository,
        store,
        images,
        builder,
    }
}

pub fn png(name: &str) -> StagedImage {
    StagedImage::new(name, "image/png", Bytes::from(format!("png:{}", name)))
}

pub fn rejected_png(name: &str) -> StagedImage {
    StagedImage::new(name, "image/png", Bytes::from_static(REJECTED_BYTES))
}

pub fn form(name: &str, price: &str) -> TractorForm {
    TractorForm {
        name: name.to_string(),
        price: price.to_string(),
        description: "Pronto para o trabalho".to_string(),
        engine: "MWM 4 cilindros".to_string(),
        horsepower: "75 cv".to_string(),
        hours_of_use: "3200".to_string(),
        location: "Varginha - MG".to_string(),
        year: "2015".to_string(),
        ..TractorForm::default()
    }
}
