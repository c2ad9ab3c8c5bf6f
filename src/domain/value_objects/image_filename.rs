use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::ValidationError;

const MAX_FILENAME_LEN: usize = 255;

/// A validated bare filename of an image in the public bucket.
///
/// Listings store this value, never a URL. Public URLs are derived at read
/// time by the image gateway.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageFilename(String);

impl ImageFilename {
    /// Create a new ImageFilename with validation
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::EmptyFilename);
        }

        if value.len() > MAX_FILENAME_LEN {
            return Err(ValidationError::FilenameTooLong {
                actual: value.len(),
                max: MAX_FILENAME_LEN,
            });
        }

        // A bare filename has no path separators, which also rules out URLs
        if let Some(c) = value
            .chars()
            .find(|c| matches!(c, '/' | '\\' | '\0') || c.is_control())
        {
            return Err(ValidationError::InvalidFilenameCharacter(c));
        }

        Ok(Self(value))
    }

    /// Generate a random base-36 filename keeping the extension of `original_name`
    pub fn generate(original_name: &str) -> Self {
        let stem = to_base36(Uuid::new_v4().as_u128());
        let name = match extension_of(original_name) {
            Some(ext) => format!("{}.{}", stem, ext),
            None => stem,
        };
        Self(name)
    }

    /// Get the filename as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the extension (everything after the last '.')
    pub fn extension(&self) -> Option<&str> {
        extension_of(&self.0)
    }
}

fn extension_of(name: &str) -> Option<&str> {
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext)
}

fn to_base36(mut value: u128) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if value == 0 {
        return "0".to_string();
    }

    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

impl TryFrom<String> for ImageFilename {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ImageFilename::new(value)
    }
}

impl From<ImageFilename> for String {
    fn from(value: ImageFilename) -> Self {
        value.0
    }
}

impl std::fmt::Display for ImageFilename {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_filename() {
        assert!(ImageFilename::new("abc123.png".to_string()).is_ok());
        assert!(ImageFilename::new("noext".to_string()).is_ok());
    }

    #[test]
    fn test_invalid_filename() {
        assert!(ImageFilename::new("".to_string()).is_err());
        assert!(ImageFilename::new("folder/file.png".to_string()).is_err());
        assert!(ImageFilename::new("https://host/images/a.png".to_string()).is_err());
        assert!(ImageFilename::new("null\0byte".to_string()).is_err());
        assert!(ImageFilename::new("x".repeat(256)).is_err());
    }

    #[test]
    fn test_generate_keeps_extension() {
        let name = ImageFilename::generate("Trator Frontal.JPG");
        assert_eq!(name.extension(), Some("JPG"));

        let stem = name.as_str().trim_end_matches(".JPG");
        assert!(stem.len() >= 10);
        assert!(stem
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_generate_without_extension() {
        let name = ImageFilename::generate("README");
        assert_eq!(name.extension(), None);
        assert!(!name.as_str().contains('.'));
    }

    #[test]
    fn test_generated_names_differ() {
        let a = ImageFilename::generate("a.png");
        let b = ImageFilename::generate("a.png");
        assert_ne!(a, b);
    }

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }
}
