use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::donations::dtos::{CheckoutUrlDto, CreateDonationDto};
use crate::features::donations::models::{NewDonor, PaymentMethod};
use crate::features::donations::repositories::DonorRepository;
use crate::modules::payments::webhook::{self, WebhookEvent};
use crate::modules::payments::{CheckoutRequest, PaymentGateway};
use crate::shared::validation::non_blank;

pub const MISSING_AMOUNT_OR_EMAIL: &str = "Missing amount or email";
pub const INVALID_AMOUNT: &str = "Invalid donation amount";

/// Parses a donation amount given as a JSON number or numeric string.
///
/// `Ok(None)` means the amount is absent.
pub fn parse_amount(value: Option<&serde_json::Value>) -> Result<Option<Decimal>> {
    let invalid = || AppError::BadRequest(INVALID_AMOUNT.to_string());
    let text = match value {
        None | Some(serde_json::Value::Null) => return Ok(None),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(serde_json::Value::String(s)) => s.trim().to_string(),
        Some(_) => return Err(invalid()),
    };

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map(Some)
        .map_err(|_| invalid())
}

pub struct DonationService {
    repository: Arc<dyn DonorRepository>,
    gateway: Option<Arc<dyn PaymentGateway>>,
    webhook_secret: Option<String>,
    frontend_url: String,
}

impl DonationService {
    pub fn new(
        repository: Arc<dyn DonorRepository>,
        gateway: Option<Arc<dyn PaymentGateway>>,
        webhook_secret: Option<String>,
        frontend_url: String,
    ) -> Self {
        if gateway.is_none() {
            tracing::warn!("Payment processor not configured; donations are disabled");
        }
        Self {
            repository,
            gateway,
            webhook_secret,
            frontend_url: frontend_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn create_checkout(&self, dto: CreateDonationDto) -> Result<CheckoutUrlDto> {
        let amount = parse_amount(dto.amount.as_ref())?;
        let email = non_blank(dto.email);

        let (Some(amount), Some(email)) = (amount, email) else {
            return Err(AppError::BadRequest(MISSING_AMOUNT_OR_EMAIL.to_string()));
        };

        let unit_amount = amount
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or_else(|| AppError::BadRequest(INVALID_AMOUNT.to_string()))?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .filter(|cents| *cents > 0)
            .ok_or_else(|| AppError::BadRequest(INVALID_AMOUNT.to_string()))?;

        let gateway = self.gateway.as_ref().ok_or_else(|| {
            AppError::ServiceUnavailable("Donations are currently unavailable".to_string())
        })?;

        let name = non_blank(dto.name);
        let session = gateway
            .create_checkout_session(CheckoutRequest {
                unit_amount,
                customer_email: email.clone(),
                donor_name: name.clone(),
                success_url: format!("{}/donate?success=true", self.frontend_url),
                cancel_url: format!("{}/donate?canceled=true", self.frontend_url),
            })
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Failed to start checkout: {}", e)))?;

        let donor = self
            .repository
            .insert_pending(NewDonor {
                id: Uuid::now_v7(),
                name,
                email,
                amount: amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
                payment_method: PaymentMethod::Stripe,
                checkout_session_id: session.id.clone(),
            })
            .await?;

        tracing::info!(
            "Donation checkout started: donor={}, session={}, amount={}",
            donor.id,
            session.id,
            donor.amount
        );

        Ok(CheckoutUrlDto { url: session.url })
    }

    /// Verifies a processor callback and applies it
    pub async fn handle_webhook(&self, payload: &[u8], signature: Option<&str>) -> Result<()> {
        let secret = self.webhook_secret.as_deref().ok_or_else(|| {
            AppError::ServiceUnavailable("Webhook secret is not configured".to_string())
        })?;
        let signature = signature
            .ok_or_else(|| AppError::BadRequest("Missing signature header".to_string()))?;

        webhook::verify_signature(
            payload,
            signature,
            secret,
            chrono::Utc::now().timestamp(),
            webhook::DEFAULT_TOLERANCE_SECS,
        )
        .map_err(|e| {
            tracing::warn!("Rejected webhook: {}", e);
            AppError::BadRequest(format!("Webhook Error: {}", e))
        })?;

        let event = WebhookEvent::parse(payload)
            .map_err(|e| AppError::BadRequest(format!("Webhook Error: {}", e)))?;

        match event.completed_session_id() {
            Some(session_id) => {
                if self.repository.mark_completed(session_id).await? {
                    tracing::info!("Donation completed for session {}", session_id);
                } else {
                    tracing::warn!("No donation recorded for completed session {}", session_id);
                }
            }
            None => {
                tracing::debug!("Ignoring webhook event {}", event.event_type);
            }
        }

        Ok(())
    }
}
