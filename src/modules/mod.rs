//! Modules layer - Infrastructure components for external integrations
//!
//! Contains clients and adapters for media storage, email and the payment processor.

pub mod email;
pub mod payments;
pub mod storage;
