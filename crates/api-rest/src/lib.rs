//! # API REST
//!
//! REST API implementation for the inventory service.
//!
//! Handles:
//! - HTTP endpoints with axum (`/register`, `/inventory`, `/search`, ...)
//! - Request body extraction for multipart, urlencoded and JSON forms
//! - Static serving of the photo cache directory under `/photos`
//! - OpenAPI/Swagger documentation under `/docs`
//!
//! All record logic lives in `inventory-core`; handlers only translate between HTTP and
//! [`InventoryService`] calls.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod extract;
pub mod handlers;
pub mod pages;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use inventory_core::{InventoryService, PHOTOS_URL_PREFIX};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use error::ApiError;

/// Request body limit applied to every route unless overridden.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Application state shared across REST API handlers
#[derive(Clone, Debug)]
pub struct AppState {
    service: Arc<InventoryService>,
    max_upload_bytes: usize,
}

impl AppState {
    pub fn new(service: InventoryService) -> Self {
        Self {
            service: Arc::new(service),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    #[must_use]
    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }

    pub fn service(&self) -> &InventoryService {
        &self.service
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::register,
        handlers::list_inventory,
        handlers::get_item,
        handlers::update_item,
        handlers::get_photo,
        handlers::replace_photo,
        handlers::delete_item,
        handlers::search,
    ),
    components(schemas(
        handlers::ItemRes,
        inventory_core::ItemChanges,
        handlers::HealthRes,
        handlers::MessageRes,
        handlers::ErrorRes,
        handlers::RegisterReq,
        handlers::PhotoReq,
        handlers::SearchReq,
    )),
    info(
        title = "Inventory API",
        version = "1.0.0",
        description = "Inventory Service Documentation"
    )
)]
pub struct ApiDoc;

/// Builds the full router: API routes, static photos, form pages and Swagger UI.
pub fn router(state: AppState) -> Router {
    let photos_dir = state.service.photos().cache_dir().to_path_buf();
    let max_upload_bytes = state.max_upload_bytes;

    Router::new()
        .route("/health", get(handlers::health))
        .route("/register", post(handlers::register))
        .route("/inventory", get(handlers::list_inventory))
        .route(
            "/inventory/:id",
            get(handlers::get_item)
                .put(handlers::update_item)
                .delete(handlers::delete_item),
        )
        .route(
            "/inventory/:id/photo",
            get(handlers::get_photo).put(handlers::replace_photo),
        )
        .route("/search", post(handlers::search))
        .route("/RegisterForm.html", get(pages::register_form))
        .route("/SearchForm.html", get(pages::search_form))
        .nest_service(PHOTOS_URL_PREFIX, ServeDir::new(photos_dir))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
