use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    domain::{
        errors::{CatalogError, CatalogResult, ValidationError},
        models::{
            GalleryImage, NewGalleryImage, RemovalReport, StagedImage, Tractor, TractorForm,
        },
        value_objects::{ImageFilename, PhoneNumber},
    },
    ports::{repositories::CatalogRepository, services::GalleryUploader},
    services::ImageGateway,
};

/// Where one admin edit session currently is
#[derive(Debug, Clone, PartialEq)]
pub enum EditorState {
    /// Blank form for a new listing
    Idle,
    /// Form loaded from an existing listing
    Editing(Tractor),
    /// A submit is running; `editing` is the listing it updates, if any
    Submitting { editing: Option<Tractor> },
}

/// Explicit answer to "are you sure?" before a listing is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Confirmation::Confirmed
        } else {
            Confirmation::Declined
        }
    }
}

/// Result of a successful submit
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub tractor: Tractor,
    pub created: bool,
    pub new_gallery: Vec<GalleryImage>,
    /// Fresh admin listing set; None if re-fetching it failed
    pub listings: Option<Vec<Tractor>>,
}

/// Controller for creating, editing and deleting listings.
///
/// Holds the form state of one edit session. Steps run one after another and
/// are not wrapped in a transaction: a failure part-way leaves whatever was
/// already written in place.
pub struct AdminWorkflow {
    repository: Arc<dyn CatalogRepository>,
    images: ImageGateway,
    gallery_uploader: Arc<dyn GalleryUploader>,
    contact_phone: PhoneNumber,

    state: EditorState,
    form: TractorForm,
    main_image: Option<StagedImage>,
    staged_gallery: Vec<StagedImage>,
    existing_gallery: Vec<GalleryImage>,
}

impl AdminWorkflow {
    pub fn new(
        repository: Arc<dyn CatalogRepository>,
        images: ImageGateway,
        gallery_uploader: Arc<dyn GalleryUploader>,
        contact_phone: PhoneNumber,
    ) -> Self {
        Self {
            repository,
            images,
            gallery_uploader,
            contact_phone,
            state: EditorState::Idle,
            form: TractorForm::default(),
            main_image: None,
            staged_gallery: Vec::new(),
            existing_gallery: Vec::new(),
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// The listing being edited, if any
    pub fn editing(&self) -> Option<&Tractor> {
        match &self.state {
            EditorState::Editing(tractor) => Some(tractor),
            EditorState::Submitting { editing } => editing.as_ref(),
            EditorState::Idle => None,
        }
    }

    pub fn form(&self) -> &TractorForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut TractorForm {
        &mut self.form
    }

    pub fn set_form(&mut self, form: TractorForm) {
        self.form = form;
    }

    pub fn main_image(&self) -> Option<&StagedImage> {
        self.main_image.as_ref()
    }

    pub fn staged_gallery(&self) -> &[StagedImage] {
        &self.staged_gallery
    }

    pub fn existing_gallery(&self) -> &[GalleryImage] {
        &self.existing_gallery
    }

    /// URL of the stored main image while editing without a new one staged
    pub fn stored_main_image_url(&self) -> Option<String> {
        if self.main_image.is_some() {
            return None;
        }
        self.editing().map(|t| self.images.public_url(t.image()))
    }

    /// Load a listing into the form and fetch its gallery.
    ///
    /// A failed gallery fetch is logged and leaves the gallery empty.
    pub async fn begin_edit(&mut self, id: Uuid) -> CatalogResult<()> {
        let tractor = self
            .repository
            .get(id)
            .await?
            .ok_or(CatalogError::TractorNotFound { id })?;

        self.form = TractorForm::from_tractor(&tractor);
        self.main_image = None;
        self.staged_gallery.clear();
        self.existing_gallery = match self.repository.list_gallery(id).await {
            Ok(gallery) => gallery,
            Err(e) => {
                warn!(tractor_id = %id, error = %e, "Error fetching gallery");
                Vec::new()
            }
        };
        self.state = EditorState::Editing(tractor);

        Ok(())
    }

    /// Drop the edit session and go back to a blank form
    pub fn cancel_edit(&mut self) {
        self.reset();
    }

    pub fn stage_main_image(&mut self, image: StagedImage) -> Result<(), ValidationError> {
        image.validate(self.images.max_upload_bytes())?;
        self.main_image = Some(image);
        Ok(())
    }

    pub fn clear_main_image(&mut self) {
        self.main_image = None;
    }

    /// Stage gallery files, skipping the invalid ones. Returns how many were skipped
    pub fn stage_gallery_images(&mut self, images: Vec<StagedImage>) -> usize {
        let max = self.images.max_upload_bytes();
        let mut skipped = 0;

        for image in images {
            match image.validate(max) {
                Ok(()) => self.staged_gallery.push(image),
                Err(e) => {
                    warn!(error = %e, "Ignoring gallery file");
                    skipped += 1;
                }
            }
        }

        skipped
    }

    /// Remove a staged (not yet uploaded) gallery file by position
    pub fn unstage_gallery_image(&mut self, index: usize) -> Option<StagedImage> {
        (index < self.staged_gallery.len()).then(|| self.staged_gallery.remove(index))
    }

    /// Save the form.
    ///
    /// On success the form is reset and the listing set re-fetched. On error
    /// the form keeps its values and the controller returns to the state it
    /// had before the submit.
    pub async fn submit(&mut self) -> CatalogResult<SubmitOutcome> {
        let editing = match std::mem::replace(&mut self.state, EditorState::Idle) {
            EditorState::Idle => None,
            EditorState::Editing(tractor) => Some(tractor),
            // An earlier submit was dropped mid-flight
            EditorState::Submitting { editing } => editing,
        };
        self.state = EditorState::Submitting {
            editing: editing.clone(),
        };

        match self.run_submit(editing.as_ref()).await {
            Ok(outcome) => {
                self.reset();
                Ok(outcome)
            }
            Err(e) => {
                warn!(error = %e, "Error saving tractor");
                self.state = match editing {
                    Some(tractor) => EditorState::Editing(tractor),
                    None => EditorState::Idle,
                };
                Err(e)
            }
        }
    }

    async fn run_submit(&self, editing: Option<&Tractor>) -> CatalogResult<SubmitOutcome> {
        // Validate everything before any upload so bad input orphans nothing
        let fields = self.form.parse()?;

        let image_url = match (&self.main_image, editing) {
            (Some(staged), _) => self.images.upload(staged).await?,
            (None, Some(tractor)) => tractor.image().clone(),
            (None, None) => return Err(ValidationError::MissingMainImage.into()),
        };

        let record = fields.into_record(image_url, self.contact_phone.clone());

        let (tractor, created) = match editing {
            Some(existing) => {
                let tractor = self
                    .repository
                    .update(existing.id, record)
                    .await?
                    .ok_or(CatalogError::TractorNotFound { id: existing.id })?;
                info!(tractor_id = %tractor.id, "Tractor updated");
                (tractor, false)
            }
            None => {
                let tractor = self.repository.insert(record).await?;
                info!(tractor_id = %tractor.id, "Tractor created");
                (tractor, true)
            }
        };

        let new_gallery = self.save_staged_gallery(&tractor).await?;

        let listings = match self.repository.list_all().await {
            Ok(listings) => Some(listings),
            Err(e) => {
                warn!(error = %e, "Error fetching tractors");
                None
            }
        };

        Ok(SubmitOutcome {
            tractor,
            created,
            new_gallery,
            listings,
        })
    }

    async fn save_staged_gallery(&self, tractor: &Tractor) -> CatalogResult<Vec<GalleryImage>> {
        if self.staged_gallery.is_empty() {
            return Ok(Vec::new());
        }

        let filenames = self
            .gallery_uploader
            .upload_batch(&self.staged_gallery)
            .await
            .map_err(|source| CatalogError::GalleryUpload {
                tractor_id: tractor.id,
                source,
            })?;

        let rows = NewGalleryImage::append(tractor.id, self.existing_gallery.len(), filenames);
        let inserted = self.repository.insert_gallery_batch(rows).await?;

        info!(
            tractor_id = %tractor.id,
            count = inserted.len(),
            "Gallery images added"
        );

        Ok(inserted)
    }

    /// Delete a listing, its images and (by cascade) its gallery rows.
    ///
    /// Image removal is best-effort and happens before the row is deleted.
    pub async fn delete_listing(
        &self,
        id: Uuid,
        confirmation: Confirmation,
    ) -> CatalogResult<RemovalReport> {
        if confirmation != Confirmation::Confirmed {
            return Err(CatalogError::ConfirmationRequired);
        }

        let tractor = self
            .repository
            .get(id)
            .await?
            .ok_or(CatalogError::TractorNotFound { id })?;
        let gallery = self.repository.list_gallery(id).await?;

        let filenames: Vec<ImageFilename> = std::iter::once(tractor.image().clone())
            .chain(gallery.into_iter().map(|g| g.image_url))
            .collect();

        let report = self.images.remove(&filenames).await;

        if !self.repository.delete_tractor(id).await? {
            return Err(CatalogError::TractorNotFound { id });
        }

        info!(
            tractor_id = %id,
            images_removed = report.removed().count(),
            images_failed = report.failed().count(),
            "Tractor deleted"
        );

        Ok(report)
    }

    /// Delete one stored gallery image: row first, then a best-effort object removal
    pub async fn remove_existing_gallery_image(
        &mut self,
        image_id: Uuid,
    ) -> CatalogResult<(GalleryImage, RemovalReport)> {
        let known = self
            .existing_gallery
            .iter()
            .find(|g| g.id == image_id)
            .cloned();

        let image = match known {
            Some(image) => image,
            None => self
                .repository
                .get_gallery_image(image_id)
                .await?
                .ok_or(CatalogError::GalleryImageNotFound { id: image_id })?,
        };

        if !self.repository.delete_gallery_image(image_id).await? {
            return Err(CatalogError::GalleryImageNotFound { id: image_id });
        }

        let report = self
            .images
            .remove(std::slice::from_ref(&image.image_url))
            .await;
        self.existing_gallery.retain(|g| g.id != image_id);

        info!(image_id = %image_id, tractor_id = %image.tractor_id, "Gallery image removed");

        Ok((image, report))
    }

    /// Every listing, newest first, for the dashboard
    pub async fn listings(&self) -> CatalogResult<Vec<Tractor>> {
        Ok(self.repository.list_all().await?)
    }

    fn reset(&mut self) {
        self.state = EditorState::Idle;
        self.form = TractorForm::default();
        self.main_image = None;
        self.staged_gallery.clear();
        self.existing_gallery.clear();
    }
}

/// Builder for AdminWorkflow. Cheap to clone; every request builds its own workflow
#[derive(Clone, Default)]
pub struct AdminWorkflowBuilder {
    repository: Option<Arc<dyn CatalogRepository>>,
    images: Option<ImageGateway>,
    gallery_uploader: Option<Arc<dyn GalleryUploader>>,
    contact_phone: Option<PhoneNumber>,
}

impl AdminWorkflowBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repository(mut self, repository: Arc<dyn CatalogRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn images(mut self, images: ImageGateway) -> Self {
        self.images = Some(images);
        self
    }

    pub fn gallery_uploader(mut self, gallery_uploader: Arc<dyn GalleryUploader>) -> Self {
        self.gallery_uploader = Some(gallery_uploader);
        self
    }

    pub fn contact_phone(mut self, contact_phone: PhoneNumber) -> Self {
        self.contact_phone = Some(contact_phone);
        self
    }

    pub fn build(&self) -> Result<AdminWorkflow, &'static str> {
        let repository = self.repository.clone().ok_or("Repository is required")?;
        let images = self.images.clone().ok_or("Image gateway is required")?;
        let gallery_uploader = self
            .gallery_uploader
            .clone()
            .ok_or("Gallery uploader is required")?;
        let contact_phone = self
            .contact_phone
            .clone()
            .ok_or("Contact phone is required")?;

        Ok(AdminWorkflow::new(
            repository,
            images,
            gallery_uploader,
            contact_phone,
        ))
    }
}
