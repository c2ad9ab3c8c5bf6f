use object_store::{local::LocalFileSystem, memory::InMemory};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

use crate::{
    adapters::{
        inbound::http::router::AppState,
        outbound::{
            auth::{GoTrueIdentityProvider, InMemoryIdentityProvider},
            persistence::{InMemoryCatalogRepository, SqlCatalogRepository},
            storage::{create_s3_store, ObjectStoreImageStore, S3Config},
        },
    },
    domain::value_objects::PhoneNumber,
    ports::{
        auth::IdentityProvider, repositories::CatalogRepository, services::GalleryUploader,
        storage::ImageStore,
    },
    services::{
        AdminWorkflowBuilder, AllOrNothingGalleryUploader, AuthGateway, CatalogServiceImpl,
        ImageGateway, DEFAULT_MAX_UPLOAD_BYTES,
    },
};

/// Dealership WhatsApp number used when none is configured
pub const DEFAULT_CONTACT_PHONE: &str = "553597400527";

/// Public URL prefix served by the built-in image route
pub const DEFAULT_PUBLIC_BASE_URL: &str = "/images";

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage_backend: StorageBackend,
    pub repository_backend: RepositoryBackend,
    pub auth_backend: AuthBackend,
    /// Prefix joined with an image filename to form its public URL
    pub public_base_url: String,
    pub contact_phone: String,
    pub max_upload_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_backend: StorageBackend::InMemory,
            repository_backend: RepositoryBackend::InMemory,
            auth_backend: AuthBackend::InMemory {
                admin_email: "admin@localhost".to_string(),
                admin_password: "admin".to_string(),
            },
            public_base_url: DEFAULT_PUBLIC_BASE_URL.to_string(),
            contact_phone: DEFAULT_CONTACT_PHONE.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Storage backend configuration
#[derive(Debug, Clone)]
pub enum StorageBackend {
    InMemory,
    Local {
        root: String,
    },
    S3 {
        bucket: String,
        region: String,
        endpoint: Option<String>,
        access_key: Option<String>,
        secret_key: Option<String>,
    },
}

/// Repository backend configuration
#[derive(Debug, Clone)]
pub enum RepositoryBackend {
    InMemory,
    Database { connection_string: String },
}

/// Identity provider configuration
#[derive(Clone)]
pub enum AuthBackend {
    InMemory {
        admin_email: String,
        admin_password: String,
    },
    GoTrue {
        url: String,
        api_key: String,
    },
}

impl std::fmt::Debug for AuthBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthBackend::InMemory { admin_email, .. } => f
                .debug_struct("InMemory")
                .field("admin_email", admin_email)
                .finish_non_exhaustive(),
            AuthBackend::GoTrue { url, .. } => f
                .debug_struct("GoTrue")
                .field("url", url)
                .finish_non_exhaustive(),
        }
    }
}

/// Application dependencies container
pub struct AppDependencies {
    pub image_store: Arc<dyn ImageStore>,
    pub repository: Arc<dyn CatalogRepository>,
    pub identity_provider: Arc<dyn IdentityProvider>,
}

/// Application services container
#[derive(Clone)]
pub struct AppServices {
    pub catalog_service: CatalogServiceImpl,
    pub auth_gateway: AuthGateway,
    pub admin_workflow: AdminWorkflowBuilder,
    pub image_gateway: ImageGateway,
}

impl AppServices {
    /// Router state for the HTTP adapter
    pub fn into_state(self) -> AppState {
        AppState {
            catalog_service: Arc::new(self.catalog_service),
            auth: self.auth_gateway,
            admin: self.admin_workflow,
            images: self.image_gateway,
        }
    }
}

/// Application builder for dependency injection
pub struct AppBuilder {
    config: AppConfig,
    image_store: Option<Arc<dyn ImageStore>>,
}

impl AppBuilder {
    /// Create a new application builder
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            image_store: None,
        }
    }

    /// Configure the application with custom settings
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Configure storage backend
    pub fn with_storage_backend(mut self, backend: StorageBackend) -> Self {
        self.config.storage_backend = backend;
        self
    }

    /// Configure repository backend
    pub fn with_repository_backend(mut self, backend: RepositoryBackend) -> Self {
        self.config.repository_backend = backend;
        self
    }

    /// Configure identity provider
    pub fn with_auth_backend(mut self, backend: AuthBackend) -> Self {
        self.config.auth_backend = backend;
        self
    }

    /// Use this image store instead of the configured storage backend
    pub fn with_image_store(mut self, store: Arc<dyn ImageStore>) -> Self {
        self.image_store = Some(store);
        self
    }

    /// Build the application dependencies
    pub async fn build_dependencies(&self) -> Result<AppDependencies, AppError> {
        let image_store = match &self.image_store {
            Some(store) => store.clone(),
            None => self.create_image_store()?,
        };

        Ok(AppDependencies {
            image_store,
            repository: self.create_repository().await?,
            identity_provider: self.create_identity_provider(),
        })
    }

    /// Build the complete application with services
    pub async fn build(self) -> Result<AppServices, AppError> {
        let contact_phone = PhoneNumber::new(self.config.contact_phone.clone()).map_err(|e| {
            AppError::Configuration {
                message: format!("Invalid contact phone: {}", e),
            }
        })?;

        let deps = self.build_dependencies().await?;

        let image_gateway = ImageGateway::new(deps.image_store, &self.config.public_base_url)
            .with_max_upload_bytes(self.config.max_upload_bytes);

        let gallery_uploader: Arc<dyn GalleryUploader> =
            Arc::new(AllOrNothingGalleryUploader::new(image_gateway.clone()));

        let catalog_service = CatalogServiceImpl::new(deps.repository.clone(), image_gateway.clone());

        let admin_workflow = AdminWorkflowBuilder::new()
            .repository(deps.repository)
            .images(image_gateway.clone())
            .gallery_uploader(gallery_uploader)
            .contact_phone(contact_phone);

        Ok(AppServices {
            catalog_service,
            auth_gateway: AuthGateway::new(deps.identity_provider),
            admin_workflow,
            image_gateway,
        })
    }

    /// Create the image store based on configuration
    fn create_image_store(&self) -> Result<Arc<dyn ImageStore>, AppError> {
        match &self.config.storage_backend {
            StorageBackend::InMemory => {
                Ok(Arc::new(ObjectStoreImageStore::new(Arc::new(InMemory::new()))))
            }
            StorageBackend::Local { root } => {
                std::fs::create_dir_all(root).map_err(|e| AppError::StorageInit {
                    message: format!("Cannot create {}: {}", root, e),
                })?;
                let local = LocalFileSystem::new_with_prefix(root).map_err(|e| {
                    AppError::StorageInit {
                        message: e.to_string(),
                    }
                })?;
                Ok(Arc::new(ObjectStoreImageStore::without_attributes(
                    Arc::new(local),
                )))
            }
            StorageBackend::S3 {
                bucket,
                region,
                endpoint,
                access_key,
                secret_key,
            } => {
                let store = create_s3_store(S3Config {
                    bucket: bucket.clone(),
                    region: region.clone(),
                    access_key: access_key.clone(),
                    secret_key: secret_key.clone(),
                    endpoint: endpoint.clone(),
                })
                .map_err(|e| AppError::StorageInit {
                    message: format!("{:#}", e),
                })?;
                Ok(Arc::new(ObjectStoreImageStore::new(store)))
            }
        }
    }

    /// Create the repository based on configuration
    async fn create_repository(&self) -> Result<Arc<dyn CatalogRepository>, AppError> {
        match &self.config.repository_backend {
            RepositoryBackend::InMemory => Ok(Arc::new(InMemoryCatalogRepository::new())),
            RepositoryBackend::Database { connection_string } => {
                let pool = PgPoolOptions::new()
                    .max_connections(5)
                    .connect(connection_string)
                    .await
                    .map_err(|e| AppError::RepositoryInit {
                        message: e.to_string(),
                    })?;

                let repository = SqlCatalogRepository::new(pool);
                repository
                    .migrate()
                    .await
                    .map_err(|e| AppError::RepositoryInit {
                        message: format!("Migration failed: {}", e),
                    })?;
                info!("Database schema ready");

                Ok(Arc::new(repository))
            }
        }
    }

    /// Create the identity provider based on configuration
    fn create_identity_provider(&self) -> Arc<dyn IdentityProvider> {
        match &self.config.auth_backend {
            AuthBackend::InMemory {
                admin_email,
                admin_password,
            } => Arc::new(InMemoryIdentityProvider::new(
                admin_email.clone(),
                admin_password.clone(),
            )),
            AuthBackend::GoTrue { url, api_key } => {
                Arc::new(GoTrueIdentityProvider::new(url.clone(), api_key.clone()))
            }
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage initialization error: {message}")]
    StorageInit { message: String },

    #[error("Repository initialization error: {message}")]
    RepositoryInit { message: String },
}

/// Create an in-memory application for testing and development
pub async fn create_in_memory_app() -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_storage_backend(StorageBackend::InMemory)
        .with_repository_backend(RepositoryBackend::InMemory)
        .build()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::services::CatalogService;

    #[tokio::test]
    async fn test_create_in_memory_app() {
        let app = create_in_memory_app().await.unwrap();

        let cards = app.catalog_service.list_available().await.unwrap();
        assert!(cards.is_empty());
        assert!(app.admin_workflow.build().is_ok());
    }

    #[tokio::test]
    async fn test_local_storage_backend() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("images").to_string_lossy().to_string();

        let app = AppBuilder::new()
            .with_storage_backend(StorageBackend::Local { root: root.clone() })
            .build()
            .await
            .unwrap();

        assert!(std::path::Path::new(&root).is_dir());
        assert_eq!(
            app.image_gateway.max_upload_bytes(),
            DEFAULT_MAX_UPLOAD_BYTES
        );
    }

    #[tokio::test]
    async fn test_invalid_contact_phone_is_rejected() {
        let config = AppConfig {
            contact_phone: "not a phone".to_string(),
            ..AppConfig::default()
        };

        let result = AppBuilder::new().with_config(config).build().await;
        assert!(matches!(result, Err(AppError::Configuration { .. })));
    }

    #[test]
    fn test_auth_backend_debug_hides_secrets() {
        let backend = AuthBackend::GoTrue {
            url: "https://auth.example.com".to_string(),
            api_key: "super-secret".to_string(),
        };
        assert!(!format!("{:?}", backend).contains("super-secret"));
    }
}
