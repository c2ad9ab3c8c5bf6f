use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::{
    handlers::{
        admin_page, catalog_page, create_tractor, delete_gallery_image, delete_tractor,
        detail_page, get_image, get_tractor, health, list_admin_tractors, list_tractors, login, logout,
        update_tractor,
    },
    middleware::require_admin,
};
use crate::{
    ports::services::CatalogService,
    services::{AdminWorkflowBuilder, AuthGateway, ImageGateway},
};

/// Main image plus gallery files accepted in one admin form post
pub const MAX_IMAGES_PER_REQUEST: usize = 16;

/// Application state containing all services
#[derive(Clone)]
pub struct AppState {
    pub catalog_service: Arc<dyn CatalogService>,
    pub auth: AuthGateway,
    pub admin: AdminWorkflowBuilder,
    pub images: ImageGateway,
}

impl AppState {
    fn max_body_bytes(&self) -> usize {
        self.images
            .max_upload_bytes()
            .saturating_mul(MAX_IMAGES_PER_REQUEST)
    }
}

/// Create the main application router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(create_public_router())
        .merge(create_admin_router(state.clone()))
        .layer(DefaultBodyLimit::max(state.max_body_bytes()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Public catalog pages and read-only API
pub fn create_public_router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog_page))
        .route("/trator/{id}", get(detail_page))
        .route("/api/tractors", get(list_tractors))
        .route("/api/tractors/{id}", get(get_tractor))
        .route("/images/{filename}", get(get_image))
        .route("/health", get(health))
}

/// Admin panel. Everything except the login page and logout needs a session
pub fn create_admin_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/admin/tractors", post(create_tractor))
        .route("/admin/tractors/{id}", post(update_tractor))
        .route("/admin/tractors/{id}/delete", post(delete_tractor))
        .route("/admin/gallery/{image_id}/delete", post(delete_gallery_image))
        .route("/api/admin/tractors", get(list_admin_tractors))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/admin", get(admin_page))
        .route("/admin/login", post(login))
        .route("/admin/logout", post(logout))
        .merge(protected)
}
