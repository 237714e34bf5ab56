use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::features::gallery::handlers::{delete_media, list_media, upload_media};
use crate::features::gallery::services::GalleryService;
use crate::shared::constants::MULTIPART_OVERHEAD_BYTES;

/// Public gallery routes (no authentication required)
pub fn public_routes(service: Arc<GalleryService>) -> Router {
    Router::new()
        .route("/api/gallery/list", get(list_media))
        .with_state(service)
}

/// Admin gallery routes
pub fn protected_routes(service: Arc<GalleryService>) -> Router {
    let body_limit = service.max_upload_bytes() + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route(
            "/api/gallery/upload",
            post(upload_media).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/api/gallery/item/{id}", delete(delete_media))
        .with_state(service)
}
