//! HTTP API module for the `/items` endpoints.

pub mod error;
pub mod handlers;
pub mod routes;

pub use error::ApiError;
pub use handlers::{ErrorResponse, ItemResponse, ItemsResponse};
pub use routes::create_router;
