use serde::Serialize;

use crate::domain::models::{carousel::ImageCarousel, gallery::GalleryImage, tractor::Tractor};

/// A listing prepared for the public catalog grid
#[derive(Debug, Clone, Serialize)]
pub struct ListingCard {
    pub tractor: Tractor,
    pub image_public_url: String,
    pub formatted_price: String,
    pub contact_link: String,
}

/// A listing prepared for the product detail page
#[derive(Debug, Clone)]
pub struct ListingDetail {
    pub tractor: Tractor,
    pub gallery: Vec<GalleryImage>,
    pub carousel: ImageCarousel,
    pub lightbox: bool,
    pub formatted_price: String,
    pub contact_link: String,
}

/// What the product page asks for besides the listing id
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DetailRequest {
    pub image_index: usize,
    pub lightbox: bool,
}
