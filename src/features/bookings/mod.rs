//! Event and space bookings.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/bookings` | No | Create a booking and email a confirmation |
//!
//! Listing and deletion live under `/api/admin`.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{BookingRepository, PgBookingRepository};
pub use services::BookingService;
