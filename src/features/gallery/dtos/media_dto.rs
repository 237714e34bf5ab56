use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::types::MediaType;

/// Upload form for OpenAPI documentation.
/// The handler reads the multipart stream directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadMediaForm {
    /// Image or video file
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub media: String,
    #[schema(example = "Gala")]
    pub title: String,
    #[schema(example = "2024")]
    pub caption: Option<String>,
}

/// A gallery item as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaItemDto {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    pub media_type: MediaType,
    /// Absolute object storage URL or `/uploads/gallery/...`
    pub media_url: String,
    /// Object storage deletion handle, absent for locally stored files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_handle: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeletedMediaDto {
    pub id: Uuid,
    pub deleted: bool,
}
