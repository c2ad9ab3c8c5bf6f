mod admin_workflow;
mod auth_gateway;
mod catalog_service_impl;
mod gallery_uploader_impl;
mod image_gateway;

pub use admin_workflow::{
    AdminWorkflow, AdminWorkflowBuilder, Confirmation, EditorState, SubmitOutcome,
};
pub use auth_gateway::AuthGateway;
pub use catalog_service_impl::CatalogServiceImpl;
pub use gallery_uploader_impl::AllOrNothingGalleryUploader;
pub use image_gateway::{ImageGateway, DEFAULT_MAX_UPLOAD_BYTES};
