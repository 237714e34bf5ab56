//! Back-office listings for the administrator.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/admin/bookings` | Admin | List bookings (paginated) |
//! | DELETE | `/api/admin/bookings/{id}` | Admin | Delete a booking |
//! | GET | `/api/admin/contacts` | Admin | List contact messages (paginated) |
//! | GET | `/api/admin/donors` | Admin | List donors (paginated) |

pub mod handlers;
pub mod routes;
pub mod services;

pub use services::AdminService;
