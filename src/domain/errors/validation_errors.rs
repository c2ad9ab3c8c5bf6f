/// Validation errors for domain value objects and admin form input
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    // ImageFilename validation errors
    EmptyFilename,
    FilenameTooLong {
        actual: usize,
        max: usize,
    },
    InvalidFilenameCharacter(char),

    // Phone number validation errors
    EmptyPhoneNumber,
    InvalidPhoneNumber(String),

    // Staged upload errors
    NotAnImage {
        file_name: String,
        content_type: String,
    },
    ImageTooLarge {
        file_name: String,
        size: usize,
        max: usize,
    },

    // Form errors
    MissingMainImage,
    MissingField(&'static str),
    InvalidNumber {
        field: &'static str,
        value: String,
    },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyFilename => write!(f, "Image filename cannot be empty"),
            ValidationError::FilenameTooLong { actual, max } => {
                write!(f, "Image filename too long: {} bytes (max: {})", actual, max)
            }
            ValidationError::InvalidFilenameCharacter(c) => {
                write!(f, "Invalid character in image filename: '{}'", c)
            }

            ValidationError::EmptyPhoneNumber => write!(f, "Phone number cannot be empty"),
            ValidationError::InvalidPhoneNumber(value) => {
                write!(f, "Phone number must contain only digits: '{}'", value)
            }

            ValidationError::NotAnImage {
                file_name,
                content_type,
            } => {
                write!(
                    f,
                    "File '{}' is not an image (content type: {})",
                    file_name, content_type
                )
            }
            ValidationError::ImageTooLarge {
                file_name,
                size,
                max,
            } => {
                write!(
                    f,
                    "Image '{}' is too large: {} bytes (max: {})",
                    file_name, size, max
                )
            }

            ValidationError::MissingMainImage => write!(f, "Por favor, selecione uma imagem."),
            ValidationError::MissingField(field) => {
                write!(f, "Required field '{}' is empty", field)
            }
            ValidationError::InvalidNumber { field, value } => {
                write!(
                    f,
                    "Invalid value for field '{}': '{}' (expected a number)",
                    field, value
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}
