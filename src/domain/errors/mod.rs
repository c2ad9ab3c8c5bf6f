mod auth_errors;
mod catalog_errors;
mod repository_errors;
mod storage_errors;
mod validation_errors;

pub use auth_errors::*;
pub use catalog_errors::*;
pub use repository_errors::*;
pub use storage_errors::*;
pub use validation_errors::*;
