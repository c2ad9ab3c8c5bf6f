pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export key types for convenience

// Domain types - core business entities and value objects
pub use domain::{
    // Errors
    AuthError,
    CatalogError,
    CatalogResult,
    // Models
    Credentials,
    GalleryImage,
    // Value objects
    ImageFilename,
    ListingCard,
    ListingDetail,
    PhoneNumber,
    Price,
    RepositoryError,
    Session,
    SessionEvent,
    StagedImage,
    StorageError,
    Tractor,
    TractorForm,
    TractorRecord,
    ValidationError,
};

// Port types - interfaces for external systems
pub use ports::{CatalogRepository, CatalogService, GalleryUploader, IdentityProvider, ImageStore};

// Service implementations - business logic
pub use services::{
    AdminWorkflow, AdminWorkflowBuilder, AllOrNothingGalleryUploader, AuthGateway,
    CatalogServiceImpl, Confirmation, EditorState, ImageGateway, SubmitOutcome,
};

// Application factory and configuration
pub use app::{
    create_in_memory_app, AppBuilder, AppConfig, AppDependencies, AppError, AppServices,
    AuthBackend, RepositoryBackend, StorageBackend,
};

// Adapter types - infrastructure implementations
pub use adapters::inbound::http::router::{create_router, AppState};
pub use adapters::outbound::{
    auth::{GoTrueIdentityProvider, InMemoryIdentityProvider},
    persistence::{InMemoryCatalogRepository, SqlCatalogRepository},
    storage::ObjectStoreImageStore,
};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        create_in_memory_app, create_router, AdminWorkflow, AppBuilder, AppServices, AppState,
        CatalogRepository, CatalogService, Confirmation, ImageGateway, ImageStore,
        InMemoryCatalogRepository, ObjectStoreImageStore, StagedImage, TractorForm,
    };
}
