mod catalog_service;
mod gallery_uploader;

pub use catalog_service::CatalogService;
pub use gallery_uploader::GalleryUploader;
