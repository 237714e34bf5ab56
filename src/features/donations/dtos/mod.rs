mod donation_dto;

pub use donation_dto::{CheckoutUrlDto, CreateDonationDto, DonorDto, WebhookAckDto};
