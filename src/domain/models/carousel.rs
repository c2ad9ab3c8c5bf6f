/// Index-based navigation over a listing's images (main image first).
///
/// The inline viewer and the full-screen lightbox share one carousel, so
/// opening the overlay keeps the current image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCarousel {
    images: Vec<String>,
    index: usize,
}

impl ImageCarousel {
    pub fn new(images: Vec<String>) -> Self {
        Self { images, index: 0 }
    }

    /// Start at `index`, clamped into range
    pub fn starting_at(images: Vec<String>, index: usize) -> Self {
        let mut carousel = Self::new(images);
        carousel.select(index);
        carousel
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn current(&self) -> Option<&str> {
        self.images.get(self.index).map(String::as_str)
    }

    /// Navigation controls are only shown with more than one image
    pub fn has_navigation(&self) -> bool {
        self.images.len() > 1
    }

    pub fn select(&mut self, index: usize) {
        self.index = index.min(self.images.len().saturating_sub(1));
    }

    pub fn next_index(&self) -> usize {
        if self.images.is_empty() {
            return 0;
        }
        (self.index + 1) % self.images.len()
    }

    pub fn previous_index(&self) -> usize {
        if self.images.is_empty() {
            return 0;
        }
        (self.index + self.images.len() - 1) % self.images.len()
    }

    pub fn next(&mut self) {
        self.index = self.next_index();
    }

    pub fn previous(&mut self) {
        self.index = self.previous_index();
    }
}
