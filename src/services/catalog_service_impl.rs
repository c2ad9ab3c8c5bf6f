use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use crate::{
    domain::{
        errors::{CatalogError, CatalogResult},
        models::{
            catalog_message, contact_link, detail_message, DetailRequest, ImageCarousel,
            ListingCard, ListingDetail,
        },
    },
    ports::{repositories::CatalogRepository, services::CatalogService},
    services::ImageGateway,
};

/// Implementation of CatalogService backing the public pages
#[derive(Clone)]
pub struct CatalogServiceImpl {
    repository: Arc<dyn CatalogRepository>,
    images: ImageGateway,
}

impl CatalogServiceImpl {
    pub fn new(repository: Arc<dyn CatalogRepository>, images: ImageGateway) -> Self {
        Self { repository, images }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn list_available(&self) -> CatalogResult<Vec<ListingCard>> {
        let tractors = self.repository.list_available().await?;

        Ok(tractors
            .into_iter()
            .map(|tractor| ListingCard {
                image_public_url: self.images.public_url(tractor.image()),
                formatted_price: tractor.details.price.format_brl(),
                contact_link: contact_link(
                    &tractor.details.whatsapp_number,
                    &catalog_message(tractor.name()),
                ),
                tractor,
            })
            .collect())
    }

    async fn listing_detail(
        &self,
        id: Uuid,
        request: DetailRequest,
    ) -> CatalogResult<ListingDetail> {
        let tractor = self
            .repository
            .get(id)
            .await?
            .ok_or(CatalogError::TractorNotFound { id })?;

        // The page still renders with just the main image
        let gallery = match self.repository.list_gallery(id).await {
            Ok(gallery) => gallery,
            Err(e) => {
                warn!(tractor_id = %id, error = %e, "Gallery not available");
                Vec::new()
            }
        };

        let images = std::iter::once(tractor.image())
            .chain(gallery.iter().map(|g| &g.image_url))
            .map(|filename| self.images.public_url(filename))
            .collect();

        Ok(ListingDetail {
            carousel: ImageCarousel::starting_at(images, request.image_index),
            lightbox: request.lightbox,
            formatted_price: tractor.details.price.format_brl(),
            contact_link: contact_link(
                &tractor.details.whatsapp_number,
                &detail_message(tractor.name()),
            ),
            tractor,
            gallery,
        })
    }
}
