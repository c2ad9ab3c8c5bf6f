use async_trait::async_trait;
use bytes::Bytes;
use object_store::{
    path::Path as ObjectPath, Attribute, Attributes, ObjectStore as ApacheObjectStore,
    PutMode, PutOptions, PutPayload,
};
use std::sync::Arc;

use crate::{
    domain::{
        errors::{StorageError, StorageResult},
        value_objects::ImageFilename,
    },
    ports::storage::{ImageStore, StoredImage},
};

/// Cache lifetime sent with every uploaded image
const CACHE_CONTROL: &str = "max-age=3600";

/// Adapter that implements our ImageStore trait using Apache object_store
pub struct ObjectStoreImageStore {
    inner: Arc<dyn ApacheObjectStore>,
    attributes: bool,
}

impl ObjectStoreImageStore {
    pub fn new(store: Arc<dyn ApacheObjectStore>) -> Self {
        Self {
            inner: store,
            attributes: true,
        }
    }

    /// For backends that cannot store object attributes (local filesystem)
    pub fn without_attributes(store: Arc<dyn ApacheObjectStore>) -> Self {
        Self {
            inner: store,
            attributes: false,
        }
    }

    fn to_object_path(filename: &ImageFilename) -> ObjectPath {
        ObjectPath::from(filename.as_str())
    }

    fn convert_error(err: object_store::Error, filename: &ImageFilename, operation: &str) -> StorageError {
        match err {
            object_store::Error::NotFound { .. } => StorageError::ObjectNotFound {
                filename: filename.clone(),
            },
            object_store::Error::AlreadyExists { .. } => StorageError::ObjectAlreadyExists {
                filename: filename.clone(),
            },
            object_store::Error::PermissionDenied { .. }
            | object_store::Error::Unauthenticated { .. } => StorageError::AccessDenied {
                filename: filename.clone(),
                operation: operation.to_string(),
            },
            _ => StorageError::InfrastructureError {
                message: format!("Failed to {} image: {}", operation, err),
                source: Some(err.to_string()),
            },
        }
    }
}

#[async_trait]
impl ImageStore for ObjectStoreImageStore {
    async fn put_image(
        &self,
        filename: &ImageFilename,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<()> {
        let path = Self::to_object_path(filename);

        let mut attributes = Attributes::new();
        if self.attributes {
            attributes.insert(Attribute::ContentType, content_type.to_string().into());
            attributes.insert(Attribute::CacheControl, CACHE_CONTROL.into());
        }

        // Create-only: an existing object with the same name is an error
        let options = PutOptions {
            mode: PutMode::Create,
            attributes,
            ..Default::default()
        };

        self.inner
            .put_opts(&path, PutPayload::from(data), options)
            .await
            .map_err(|e| Self::convert_error(e, filename, "put"))?;

        Ok(())
    }

    async fn get_image(&self, filename: &ImageFilename) -> StorageResult<StoredImage> {
        let path = Self::to_object_path(filename);

        let result = self
            .inner
            .get(&path)
            .await
            .map_err(|e| Self::convert_error(e, filename, "get"))?;

        let content_type = result
            .attributes
            .get(&Attribute::ContentType)
            .map(|value| value.as_ref().to_string());

        let data = result
            .bytes()
            .await
            .map_err(|e| Self::convert_error(e, filename, "get"))?;

        Ok(StoredImage { data, content_type })
    }

    async fn delete_image(&self, filename: &ImageFilename) -> StorageResult<()> {
        let path = Self::to_object_path(filename);

        self.inner
            .delete(&path)
            .await
            .map_err(|e| Self::convert_error(e, filename, "delete"))?;

        Ok(())
    }
}
