use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::gallery::dtos::MediaItemDto;
use crate::modules::storage::MediaReference;
use crate::shared::types::MediaType;

/// Database model for a gallery item
#[derive(Debug, Clone, FromRow)]
pub struct MediaItem {
    pub id: Uuid,
    pub title: String,
    pub caption: Option<String>,
    pub media_type: MediaType,
    pub media_url: String,
    pub storage_handle: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MediaItem {
    pub fn reference(&self) -> MediaReference<'_> {
        MediaReference {
            media_url: &self.media_url,
            storage_handle: self.storage_handle.as_deref(),
            media_type: self.media_type,
        }
    }
}

/// Values for a catalog insert
#[derive(Debug, Clone)]
pub struct NewMediaItem {
    pub id: Uuid,
    pub title: String,
    pub caption: Option<String>,
    pub media_type: MediaType,
    pub media_url: String,
    pub storage_handle: Option<String>,
}

impl From<MediaItem> for MediaItemDto {
    fn from(item: MediaItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            caption: item.caption,
            media_type: item.media_type,
            media_url: item.media_url,
            storage_handle: item.storage_handle,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}
