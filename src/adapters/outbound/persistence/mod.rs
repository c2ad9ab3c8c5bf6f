mod in_memory_catalog_repository;
mod sql_catalog_repository;

pub use in_memory_catalog_repository::InMemoryCatalogRepository;
pub use sql_catalog_repository::SqlCatalogRepository;
