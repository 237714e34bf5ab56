use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::admin::handlers as admin_handlers;
use crate::features::auth;
use crate::features::bookings::{dtos as bookings_dtos, handlers as bookings_handlers};
use crate::features::contacts::{dtos as contacts_dtos, handlers as contacts_handlers};
use crate::features::donations::{
    dtos as donations_dtos, handlers as donations_handlers, models as donations_models,
};
use crate::features::gallery::{dtos as gallery_dtos, handlers as gallery_handlers};
use crate::shared::types::{ApiResponse, MediaType, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::login,
        auth::handlers::get_me,
        // Gallery
        gallery_handlers::upload_media,
        gallery_handlers::list_media,
        gallery_handlers::delete_media,
        // Bookings (public)
        bookings_handlers::create_booking,
        // Contact (public)
        contacts_handlers::submit_contact,
        // Donations
        donations_handlers::create_donation,
        donations_handlers::donation_webhook,
        // Admin
        admin_handlers::list_bookings,
        admin_handlers::delete_booking,
        admin_handlers::list_contacts,
        admin_handlers::list_donors,
    ),
    components(
        schemas(
            // Shared
            Meta,
            MediaType,
            // Auth
            auth::model::AuthenticatedAdmin,
            auth::dtos::LoginRequestDto,
            auth::dtos::LoginResponseDto,
            ApiResponse<auth::dtos::LoginResponseDto>,
            ApiResponse<auth::model::AuthenticatedAdmin>,
            // Gallery
            gallery_dtos::UploadMediaForm,
            gallery_dtos::MediaItemDto,
            gallery_dtos::DeletedMediaDto,
            ApiResponse<gallery_dtos::DeletedMediaDto>,
            // Bookings
            bookings_dtos::CreateBookingDto,
            bookings_dtos::BookingDto,
            ApiResponse<bookings_dtos::BookingDto>,
            ApiResponse<Vec<bookings_dtos::BookingDto>>,
            // Contact
            contacts_dtos::CreateContactDto,
            contacts_dtos::ContactMessageDto,
            ApiResponse<contacts_dtos::ContactMessageDto>,
            ApiResponse<Vec<contacts_dtos::ContactMessageDto>>,
            // Donations
            donations_models::PaymentMethod,
            donations_models::PaymentStatus,
            donations_dtos::CreateDonationDto,
            donations_dtos::CheckoutUrlDto,
            donations_dtos::WebhookAckDto,
            donations_dtos::DonorDto,
            ApiResponse<donations_dtos::CheckoutUrlDto>,
            ApiResponse<Vec<donations_dtos::DonorDto>>,
        )
    ),
    tags(
        (name = "auth", description = "Administrator sign-in"),
        (name = "gallery", description = "Gallery media upload, listing and removal"),
        (name = "bookings", description = "Event and space bookings (public)"),
        (name = "contact", description = "Contact form (public)"),
        (name = "donations", description = "Donation checkout and payment callbacks"),
        (name = "admin", description = "Admin endpoints (admin token required)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "RSYI API",
        version = "0.1.0",
        description = "API documentation for the RSYI website backend",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to the OpenAPI document
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
