pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod views;

pub use dto::*;
pub use handlers::*;
pub use middleware::*;
pub use router::*;
