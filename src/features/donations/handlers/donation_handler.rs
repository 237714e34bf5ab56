use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::donations::dtos::{CheckoutUrlDto, CreateDonationDto, WebhookAckDto};
use crate::features::donations::services::DonationService;
use crate::shared::types::ApiResponse;

const SIGNATURE_HEADER: &str = "stripe-signature";

/// Start a donation checkout
#[utoipa::path(
    post,
    path = "/api/donations",
    request_body = CreateDonationDto,
    responses(
        (status = 200, description = "Checkout session created", body = ApiResponse<CheckoutUrlDto>),
        (status = 400, description = "Missing or invalid amount or email"),
        (status = 502, description = "Payment processor error"),
        (status = 503, description = "Donations not configured")
    ),
    tag = "donations"
)]
pub async fn create_donation(
    State(service): State<Arc<DonationService>>,
    AppJson(dto): AppJson<CreateDonationDto>,
) -> Result<Json<ApiResponse<CheckoutUrlDto>>> {
    let checkout = service.create_checkout(dto).await?;
    Ok(Json(ApiResponse::success(Some(checkout), None, None)))
}

/// Payment processor webhook
///
/// The raw body is verified against the `Stripe-Signature` header before it is parsed.
#[utoipa::path(
    post,
    path = "/api/donations/webhook",
    request_body(content = String, content_type = "application/json"),
    responses(
        (status = 200, description = "Event acknowledged", body = WebhookAckDto),
        (status = 400, description = "Missing or invalid signature")
    ),
    tag = "donations"
)]
pub async fn donation_webhook(
    State(service): State<Arc<DonationService>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAckDto>> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    service.handle_webhook(&body, signature).await?;
    Ok(Json(WebhookAckDto { received: true }))
}
