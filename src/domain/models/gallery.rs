use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::ImageFilename;

/// One additional photo attached to a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: Uuid,
    pub tractor_id: Uuid,
    pub image_url: ImageFilename,
    /// Display order; neither unique nor contiguous
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

/// A gallery row waiting to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewGalleryImage {
    pub tractor_id: Uuid,
    pub image_url: ImageFilename,
    pub sort_order: i32,
}

impl NewGalleryImage {
    /// Rows for freshly uploaded files, appended after `existing_count` images
    pub fn append(
        tractor_id: Uuid,
        existing_count: usize,
        filenames: Vec<ImageFilename>,
    ) -> Vec<NewGalleryImage> {
        filenames
            .into_iter()
            .enumerate()
            .map(|(index, image_url)| NewGalleryImage {
                tractor_id,
                image_url,
                sort_order: (existing_count + index) as i32,
            })
            .collect()
    }

    pub fn into_gallery_image(self) -> GalleryImage {
        GalleryImage {
            id: Uuid::new_v4(),
            tractor_id: self.tractor_id,
            image_url: self.image_url,
            sort_order: self.sort_order,
            created_at: Utc::now(),
        }
    }
}
