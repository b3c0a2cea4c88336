//! HTTP API route definitions.

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers::{create_item, list_items};
use crate::store::ItemStore;

/// Create the item API router around the given store.
pub fn create_router(store: ItemStore) -> Router {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .layer(TraceLayer::new_for_http())
        // Any origin may call the API.
        .layer(CorsLayer::permissive())
        .with_state(store)
}
