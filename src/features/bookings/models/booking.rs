use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::bookings::dtos::BookingDto;

/// Database model for a booking
#[derive(Debug, Clone, FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date: String,
    pub time: String,
    pub duration: String,
    pub notes: Option<String>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewBooking {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date: String,
    pub time: String,
    pub duration: String,
    pub notes: Option<String>,
    pub category: Option<String>,
}

impl From<Booking> for BookingDto {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            name: b.name,
            email: b.email,
            phone: b.phone,
            date: b.date,
            time: b.time,
            duration: b.duration,
            notes: b.notes,
            category: b.category,
            created_at: b.created_at,
        }
    }
}
