pub mod admin;
pub mod auth;
pub mod bookings;
pub mod contacts;
pub mod donations;
pub mod gallery;
