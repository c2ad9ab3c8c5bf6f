pub mod image_filename;
pub mod phone_number;
pub mod price;

pub use image_filename::ImageFilename;
pub use phone_number::PhoneNumber;
pub use price::{format_brl, Price};
