use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    errors::RepositoryResult,
    models::{GalleryImage, NewGalleryImage, Tractor, TractorRecord},
};

/// Repository for listings and their gallery rows.
/// Deleting a tractor cascades to its gallery; callers never delete those rows themselves.
#[async_trait]
pub trait CatalogRepository: Send + Sync + 'static {
    /// Available listings, newest first
    async fn list_available(&self) -> RepositoryResult<Vec<Tractor>>;

    /// Every listing, newest first
    async fn list_all(&self) -> RepositoryResult<Vec<Tractor>>;

    async fn get(&self, id: Uuid) -> RepositoryResult<Option<Tractor>>;

    async fn insert(&self, record: TractorRecord) -> RepositoryResult<Tractor>;

    /// Overwrite a listing. No concurrency check: the last writer wins.
    /// Returns None when the id has no row
    async fn update(&self, id: Uuid, record: TractorRecord) -> RepositoryResult<Option<Tractor>>;

    /// Delete a listing and, by cascade, its gallery. Returns whether a row was deleted
    async fn delete_tractor(&self, id: Uuid) -> RepositoryResult<bool>;

    /// Gallery of a listing ordered by sort position ascending
    async fn list_gallery(&self, tractor_id: Uuid) -> RepositoryResult<Vec<GalleryImage>>;

    /// Insert gallery rows as one batch; either all rows land or none do
    async fn insert_gallery_batch(
        &self,
        rows: Vec<NewGalleryImage>,
    ) -> RepositoryResult<Vec<GalleryImage>>;

    async fn get_gallery_image(&self, id: Uuid) -> RepositoryResult<Option<GalleryImage>>;

    /// Returns whether a row was deleted
    async fn delete_gallery_image(&self, id: Uuid) -> RepositoryResult<bool>;
}
