pub mod admin_handlers;
pub mod catalog_handlers;

pub use admin_handlers::*;
pub use catalog_handlers::*;
