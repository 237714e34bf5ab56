use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::gallery::models::{MediaItem, NewMediaItem};
use crate::shared::constants::LOCAL_GALLERY_URL_PREFIX;

/// Catalog of gallery items
#[async_trait]
pub trait MediaRepository: Send + Sync {
    async fn insert(&self, item: NewMediaItem) -> Result<MediaItem>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<MediaItem>>;

    /// All items, `created_at` descending
    async fn list_newest_first(&self) -> Result<Vec<MediaItem>>;

    /// Returns `false` when no row matched
    async fn delete(&self, id: Uuid) -> Result<bool>;

    /// Items stored on local disk: no handle and a `/uploads/gallery/` URL
    async fn list_local_only(&self) -> Result<Vec<MediaItem>>;

    /// Points an item at a new location and bumps `updated_at`
    async fn update_location(
        &self,
        id: Uuid,
        media_url: &str,
        storage_handle: Option<&str>,
    ) -> Result<Option<MediaItem>>;
}

pub struct PgMediaRepository {
    pool: PgPool,
}

impl PgMediaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str =
    "id, title, caption, media_type, media_url, storage_handle, created_at, updated_at";

#[async_trait]
impl MediaRepository for PgMediaRepository {
    async fn insert(&self, item: NewMediaItem) -> Result<MediaItem> {
        let query = format!(
            r#"
            INSERT INTO gallery_items (id, title, caption, media_type, media_url, storage_handle)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COLUMNS}
            "#
        );

        let created = sqlx::query_as::<_, MediaItem>(&query)
            .bind(item.id)
            .bind(&item.title)
            .bind(&item.caption)
            .bind(item.media_type)
            .bind(&item.media_url)
            .bind(&item.storage_handle)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert gallery item: {:?}", e);
                e
            })?;

        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<MediaItem>> {
        let query = format!("SELECT {COLUMNS} FROM gallery_items WHERE id = $1");

        let item = sqlx::query_as::<_, MediaItem>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(item)
    }

    async fn list_newest_first(&self) -> Result<Vec<MediaItem>> {
        let query =
            format!("SELECT {COLUMNS} FROM gallery_items ORDER BY created_at DESC, id DESC");

        let items = sqlx::query_as::<_, MediaItem>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM gallery_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_local_only(&self) -> Result<Vec<MediaItem>> {
        let query = format!(
            r#"
            SELECT {COLUMNS} FROM gallery_items
            WHERE storage_handle IS NULL AND media_url LIKE $1
            ORDER BY created_at ASC
            "#
        );

        let items = sqlx::query_as::<_, MediaItem>(&query)
            .bind(format!("{}/%", LOCAL_GALLERY_URL_PREFIX))
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    async fn update_location(
        &self,
        id: Uuid,
        media_url: &str,
        storage_handle: Option<&str>,
    ) -> Result<Option<MediaItem>> {
        let query = format!(
            r#"
            UPDATE gallery_items
            SET media_url = $2, storage_handle = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        );

        let item = sqlx::query_as::<_, MediaItem>(&query)
            .bind(id)
            .bind(media_url)
            .bind(storage_handle)
            .fetch_optional(&self.pool)
            .await?;

        Ok(item)
    }
}
