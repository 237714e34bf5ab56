use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::donations::handlers;
use crate::features::donations::services::DonationService;

/// Public donation routes; the webhook authenticates by signature
pub fn routes(service: Arc<DonationService>) -> Router {
    Router::new()
        .route("/api/donations", post(handlers::create_donation))
        .route("/api/donations/webhook", post(handlers::donation_webhook))
        .with_state(service)
}
