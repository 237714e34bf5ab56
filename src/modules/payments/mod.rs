//! Payment processor integration
//!
//! Donations go through a hosted checkout page. [`PaymentGateway`] creates the
//! session; [`StripeClient`] is the production implementation and
//! [`webhook`] verifies and decodes the processor's callbacks.

mod gateway;
mod stripe_client;
pub mod webhook;

pub use gateway::{CheckoutRequest, CheckoutSession, PaymentError, PaymentGateway};
pub use stripe_client::StripeClient;
