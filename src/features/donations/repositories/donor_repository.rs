use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::Result;
use crate::features::donations::models::{Donor, NewDonor, PaymentStatus};

#[async_trait]
pub trait DonorRepository: Send + Sync {
    /// Records a donation awaiting payment
    async fn insert_pending(&self, donor: NewDonor) -> Result<Donor>;

    /// Marks the donation behind a checkout session completed.
    /// Returns `false` when no donation carries that session id.
    async fn mark_completed(&self, checkout_session_id: &str) -> Result<bool>;

    /// One page of donors, newest first
    async fn list_newest_first(&self, offset: i64, limit: i64) -> Result<Vec<Donor>>;

    async fn count(&self) -> Result<i64>;
}

pub struct PgDonorRepository {
    pool: PgPool,
}

impl PgDonorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str = "id, name, email, contact, amount, payment_method, payment_status, \
                       checkout_session_id, created_at, updated_at";

#[async_trait]
impl DonorRepository for PgDonorRepository {
    async fn insert_pending(&self, donor: NewDonor) -> Result<Donor> {
        let query = format!(
            r#"
            INSERT INTO donors (id, name, email, amount, payment_method, payment_status, checkout_session_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {COLUMNS}
            "#
        );

        let created = sqlx::query_as::<_, Donor>(&query)
            .bind(donor.id)
            .bind(&donor.name)
            .bind(&donor.email)
            .bind(donor.amount)
            .bind(donor.payment_method)
            .bind(PaymentStatus::Pending)
            .bind(&donor.checkout_session_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to record donation: {:?}", e);
                e
            })?;

        Ok(created)
    }

    async fn mark_completed(&self, checkout_session_id: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE donors
            SET payment_status = $2, updated_at = NOW()
            WHERE checkout_session_id = $1
            "#,
        )
        .bind(checkout_session_id)
        .bind(PaymentStatus::Completed)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_newest_first(&self, offset: i64, limit: i64) -> Result<Vec<Donor>> {
        let query = format!(
            "SELECT {COLUMNS} FROM donors ORDER BY created_at DESC OFFSET $1 LIMIT $2"
        );

        let rows = sqlx::query_as::<_, Donor>(&query)
            .bind(offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn count(&self) -> Result<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM donors")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }
}
