use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    domain::{
        errors::{RepositoryError, RepositoryResult},
        models::{GalleryImage, NewGalleryImage, Tractor, TractorRecord},
    },
    ports::repositories::CatalogRepository,
};

/// In-memory implementation of CatalogRepository for testing and development
#[derive(Clone, Default)]
pub struct InMemoryCatalogRepository {
    data: Arc<RwLock<RepositoryData>>,
}

#[derive(Default)]
struct RepositoryData {
    tractors: HashMap<Uuid, Tractor>,
    gallery: HashMap<Uuid, GalleryImage>,
}

impl InMemoryCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(mut tractors: Vec<Tractor>) -> Vec<Tractor> {
    tractors.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    tractors
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    async fn list_available(&self) -> RepositoryResult<Vec<Tractor>> {
        let data = self.data.read().await;

        Ok(newest_first(
            data.tractors
                .values()
                .filter(|t| t.is_available())
                .cloned()
                .collect(),
        ))
    }

    async fn list_all(&self) -> RepositoryResult<Vec<Tractor>> {
        let data = self.data.read().await;
        Ok(newest_first(data.tractors.values().cloned().collect()))
    }

    async fn get(&self, id: Uuid) -> RepositoryResult<Option<Tractor>> {
        let data = self.data.read().await;
        Ok(data.tractors.get(&id).cloned())
    }

    async fn insert(&self, record: TractorRecord) -> RepositoryResult<Tractor> {
        let mut data = self.data.write().await;

        let tractor = Tractor::new(record);
        data.tractors.insert(tractor.id, tractor.clone());

        Ok(tractor)
    }

    async fn update(&self, id: Uuid, record: TractorRecord) -> RepositoryResult<Option<Tractor>> {
        let mut data = self.data.write().await;

        Ok(data.tractors.get_mut(&id).map(|stored| {
            stored.details = record;
            stored.clone()
        }))
    }

    async fn delete_tractor(&self, id: Uuid) -> RepositoryResult<bool> {
        let mut data = self.data.write().await;

        if data.tractors.remove(&id).is_none() {
            return Ok(false);
        }

        // Same effect as the ON DELETE CASCADE foreign key in SQL
        data.gallery.retain(|_, image| image.tractor_id != id);

        Ok(true)
    }

    async fn list_gallery(&self, tractor_id: Uuid) -> RepositoryResult<Vec<GalleryImage>> {
        let data = self.data.read().await;

        let mut images: Vec<GalleryImage> = data
            .gallery
            .values()
            .filter(|image| image.tractor_id == tractor_id)
            .cloned()
            .collect();

        images.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then(a.created_at.cmp(&b.created_at))
        });

        Ok(images)
    }

    async fn insert_gallery_batch(
        &self,
        rows: Vec<NewGalleryImage>,
    ) -> RepositoryResult<Vec<GalleryImage>> {
        let mut data = self.data.write().await;

        // Reject the whole batch like a foreign key violation would
        if let Some(orphan) = rows
            .iter()
            .find(|row| !data.tractors.contains_key(&row.tractor_id))
        {
            return Err(RepositoryError::Database {
                message: format!(
                    "tractor_gallery.tractor_id references missing tractor {}",
                    orphan.tractor_id
                ),
            });
        }

        let images: Vec<GalleryImage> = rows
            .into_iter()
            .map(NewGalleryImage::into_gallery_image)
            .collect();

        for image in &images {
            data.gallery.insert(image.id, image.clone());
        }

        Ok(images)
    }

    async fn get_gallery_image(&self, id: Uuid) -> RepositoryResult<Option<GalleryImage>> {
        let data = self.data.read().await;
        Ok(data.gallery.get(&id).cloned())
    }

    async fn delete_gallery_image(&self, id: Uuid) -> RepositoryResult<bool> {
        let mut data = self.data.write().await;
        Ok(data.gallery.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{ImageFilename, PhoneNumber, Price};

    fn filename(name: &str) -> ImageFilename {
        ImageFilename::new(name.to_string()).unwrap()
    }

    fn record(name: &str, is_available: bool) -> TractorRecord {
        TractorRecord {
            name: name.to_string(),
            price: Price::new(85000.0).unwrap(),
            description: String::new(),
            image_url: filename("main.png"),
            whatsapp_number: PhoneNumber::new("553597400527".to_string()).unwrap(),
            is_available,
            engine: None,
            horsepower: None,
            drivetrain: None,
            hours_of_use: None,
            condition: None,
            location: None,
            year: None,
            single_owner: false,
        }
    }

    #[tokio::test]
    async fn test_list_available_hides_unavailable() {
        let repo = InMemoryCatalogRepository::new();
        repo.insert(record("Massey 275", true)).await.unwrap();
        repo.insert(record("Valtra BM110", false)).await.unwrap();

        let available = repo.list_available().await.unwrap();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].name(), "Massey 275");
        assert_eq!(repo.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_missing_row_returns_none() {
        let repo = InMemoryCatalogRepository::new();
        let result = repo
            .update(Uuid::new_v4(), record("Ghost", true))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_gallery_sorted_and_cascaded() {
        let repo = InMemoryCatalogRepository::new();
        let tractor = repo.insert(record("John Deere 5078E", true)).await.unwrap();

        repo.insert_gallery_batch(vec![
            NewGalleryImage {
                tractor_id: tractor.id,
                image_url: filename("late.png"),
                sort_order: 5,
            },
            NewGalleryImage {
                tractor_id: tractor.id,
                image_url: filename("early.png"),
                sort_order: 1,
            },
        ])
        .await
        .unwrap();

        let gallery = repo.list_gallery(tractor.id).await.unwrap();
        let orders: Vec<i32> = gallery.iter().map(|g| g.sort_order).collect();
        assert_eq!(orders, vec![1, 5]);

        assert!(repo.delete_tractor(tractor.id).await.unwrap());
        assert!(repo.list_gallery(tractor.id).await.unwrap().is_empty());
        assert!(repo.get_gallery_image(gallery[0].id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_gallery_batch_for_missing_tractor_inserts_nothing() {
        let repo = InMemoryCatalogRepository::new();
        let tractor = repo.insert(record("Yanmar", true)).await.unwrap();

        let result = repo
            .insert_gallery_batch(vec![
                NewGalleryImage {
                    tractor_id: tractor.id,
                    image_url: filename("ok.png"),
                    sort_order: 0,
                },
                NewGalleryImage {
                    tractor_id: Uuid::new_v4(),
                    image_url: filename("orphan.png"),
                    sort_order: 1,
                },
            ])
            .await;

        assert!(matches!(result, Err(RepositoryError::Database { .. })));
        assert!(repo.list_gallery(tractor.id).await.unwrap().is_empty());
    }
}
