use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::contacts::handlers;
use crate::features::contacts::services::ContactService;

/// Public contact routes
pub fn routes(service: Arc<ContactService>) -> Router {
    Router::new()
        .route("/api/contact", post(handlers::submit_contact))
        .with_state(service)
}
