pub mod carousel;
pub mod contact;
pub mod form;
pub mod gallery;
pub mod listing;
pub mod removal;
pub mod session;
pub mod tractor;
pub mod upload;

pub use carousel::ImageCarousel;
pub use contact::{catalog_message, contact_link, detail_message};
pub use form::{TractorFields, TractorForm};
pub use gallery::{GalleryImage, NewGalleryImage};
pub use listing::{DetailRequest, ListingCard, ListingDetail};
pub use removal::{RemovalOutcome, RemovalReport};
pub use session::{Credentials, Session, SessionEvent};
pub use tractor::{Tractor, TractorRecord, CONDITION_OPTIONS, DRIVETRAIN_OPTIONS};
pub use upload::StagedImage;
