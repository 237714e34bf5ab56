//! Donations through a hosted payment checkout.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/donations` | No | Start a checkout session, returns its URL |
//! | POST | `/api/donations/webhook` | Signature | Processor callback marking donations completed |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{DonorRepository, PgDonorRepository};
pub use services::DonationService;
