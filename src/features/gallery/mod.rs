//! Gallery media.
//!
//! Admins upload images and videos with a title and optional caption; the
//! public site lists them newest first. Bytes live in whichever storage
//! backend was selected at startup, and each item remembers how to reach its
//! own bytes for deletion.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/gallery/upload` | Admin | Upload media (multipart) |
//! | GET | `/api/gallery/list` | No | List all media, newest first |
//! | DELETE | `/api/gallery/item/{id}` | Admin | Delete media and its stored bytes |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{MediaRepository, PgMediaRepository};
pub use services::{GalleryMigrationService, GalleryService};
