pub mod donation_handler;

pub use donation_handler::{__path_create_donation, __path_donation_webhook, create_donation, donation_webhook};
