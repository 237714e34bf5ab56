use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::bookings::handlers;
use crate::features::bookings::services::BookingService;

/// Public booking routes
pub fn routes(service: Arc<BookingService>) -> Router {
    Router::new()
        .route("/api/bookings", post(handlers::create_booking))
        .with_state(service)
}
