use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::donations::dtos::DonorDto;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "payment_method", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Stripe,
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
}

/// Database model for a donor record
#[derive(Debug, Clone, FromRow)]
pub struct Donor {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub checkout_session_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewDonor {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub checkout_session_id: String,
}

impl From<Donor> for DonorDto {
    fn from(d: Donor) -> Self {
        Self {
            id: d.id,
            name: d.name,
            email: d.email,
            contact: d.contact,
            amount: d.amount,
            payment_method: d.payment_method,
            payment_status: d.payment_status,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}
