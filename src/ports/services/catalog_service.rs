use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    errors::CatalogResult,
    models::{DetailRequest, ListingCard, ListingDetail},
};

/// Port for the public, read-only side of the catalog
#[async_trait]
pub trait CatalogService: Send + Sync + 'static {
    /// Available listings, newest first, ready for the catalog grid
    async fn list_available(&self) -> CatalogResult<Vec<ListingCard>>;

    /// One listing with its gallery and carousel position
    async fn listing_detail(&self, id: Uuid, request: DetailRequest)
        -> CatalogResult<ListingDetail>;
}
