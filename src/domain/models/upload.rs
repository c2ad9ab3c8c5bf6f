use bytes::Bytes;

use crate::domain::errors::ValidationError;

/// A file chosen in the admin form but not uploaded yet
#[derive(Debug, Clone, PartialEq)]
pub struct StagedImage {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl StagedImage {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }

    /// Check the file is an image no larger than `max_bytes`
    pub fn validate(&self, max_bytes: usize) -> Result<(), ValidationError> {
        if !self.is_image() {
            return Err(ValidationError::NotAnImage {
                file_name: self.file_name.clone(),
                content_type: self.content_type.clone(),
            });
        }

        if self.data.len() > max_bytes {
            return Err(ValidationError::ImageTooLarge {
                file_name: self.file_name.clone(),
                size: self.data.len(),
                max: max_bytes,
            });
        }

        Ok(())
    }
}
