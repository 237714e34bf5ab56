use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::donations::models::{PaymentMethod, PaymentStatus};

/// Request DTO for starting a donation
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateDonationDto {
    /// Amount in major currency units, as a number or numeric string
    #[schema(value_type = Option<f64>, example = 25.5)]
    pub amount: Option<serde_json::Value>,
    #[serde(alias = "donorEmail")]
    pub email: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CheckoutUrlDto {
    /// Hosted checkout page to redirect the donor to
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WebhookAckDto {
    pub received: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonorDto {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
    #[schema(value_type = String, example = "25.50")]
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
