mod donation_service;

pub use donation_service::{parse_amount, DonationService};
