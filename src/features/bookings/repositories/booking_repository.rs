use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::bookings::models::{Booking, NewBooking};

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn insert(&self, booking: NewBooking) -> Result<Booking>;

    /// One page of bookings, newest first
    async fn list_newest_first(&self, offset: i64, limit: i64) -> Result<Vec<Booking>>;

    async fn count(&self) -> Result<i64>;

    /// Returns `false` when no row matched
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn insert(&self, booking: NewBooking) -> Result<Booking> {
        let created = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (id, name, email, phone, date, time, duration, notes, category)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, name, email, phone, date, time, duration, notes, category, created_at
            "#,
        )
        .bind(booking.id)
        .bind(&booking.name)
        .bind(&booking.email)
        .bind(&booking.phone)
        .bind(&booking.date)
        .bind(&booking.time)
        .bind(&booking.duration)
        .bind(&booking.notes)
        .bind(&booking.category)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create booking: {:?}", e);
            e
        })?;

        Ok(created)
    }

    async fn list_newest_first(&self, offset: i64, limit: i64) -> Result<Vec<Booking>> {
        let rows = sqlx::query_as::<_, Booking>(
            r#"
            SELECT id, name, email, phone, date, time, duration, notes, category, created_at
            FROM bookings
            ORDER BY created_at DESC
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn count(&self) -> Result<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
