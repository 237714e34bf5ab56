use std::sync::Arc;

use axum::{
    routing::{delete, get},
    Router,
};

use crate::features::admin::handlers;
use crate::features::admin::services::AdminService;

/// Admin routes, nested under `/api/admin` (all require an admin token)
pub fn routes(admin_service: Arc<AdminService>) -> Router {
    Router::new()
        .route("/bookings", get(handlers::list_bookings))
        .route("/bookings/{id}", delete(handlers::delete_booking))
        .route("/contacts", get(handlers::list_contacts))
        .route("/donors", get(handlers::list_donors))
        .with_state(admin_service)
}
