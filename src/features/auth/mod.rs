//! Admin authentication.
//!
//! A single administrator signs in with the configured email and an Argon2
//! password hash and receives an HS256 bearer token. Admin routes sit behind
//! [`crate::core::middleware::auth_middleware`], which validates that token.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/auth/login` | No | Exchange admin credentials for a token |
//! | GET | `/api/auth/me` | Admin | Identity behind the current token |

pub mod dtos;
pub mod guards;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod services;

pub use services::{AuthService, TokenService};
