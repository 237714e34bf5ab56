use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::gallery::dtos::MediaItemDto;
use crate::features::gallery::models::NewMediaItem;
use crate::features::gallery::repositories::MediaRepository;
use crate::modules::storage::{MediaReference, MediaStorage, MediaUpload};
use crate::shared::types::MediaType;
use crate::shared::validation::non_blank;

/// File part of an upload form
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub data: Vec<u8>,
    pub file_name: String,
    pub content_type: String,
}

/// Parsed upload form; every field may be missing
#[derive(Debug, Clone, Default)]
pub struct UploadMedia {
    pub title: Option<String>,
    pub caption: Option<String>,
    pub file: Option<UploadedFile>,
}

/// Service for gallery uploads, listing and deletion
pub struct GalleryService {
    repository: Arc<dyn MediaRepository>,
    storage: MediaStorage,
    max_upload_bytes: usize,
}

impl GalleryService {
    pub fn new(
        repository: Arc<dyn MediaRepository>,
        storage: MediaStorage,
        max_upload_bytes: usize,
    ) -> Self {
        info!(
            "Gallery storage backend: {} (max upload {} bytes)",
            storage.active_backend(),
            max_upload_bytes
        );
        Self {
            repository,
            storage,
            max_upload_bytes,
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    /// Validates the form, stores the bytes, then records the item.
    ///
    /// Nothing is stored or recorded unless the form is valid. If the record
    /// cannot be written the stored bytes are removed again.
    pub async fn upload(&self, form: UploadMedia) -> Result<MediaItemDto> {
        let file = form
            .file
            .ok_or_else(|| AppError::BadRequest("No media file uploaded".to_string()))?;
        let title = non_blank(form.title)
            .ok_or_else(|| AppError::BadRequest("Title is required".to_string()))?;
        let caption = non_blank(form.caption);

        if file.data.len() > self.max_upload_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "File too large. Maximum size is {} bytes ({} MB)",
                self.max_upload_bytes,
                self.max_upload_bytes / 1024 / 1024
            )));
        }

        let media_type = MediaType::from_content_type(&file.content_type);
        let stored = self
            .storage
            .store(MediaUpload {
                data: file.data,
                original_filename: file.file_name,
                content_type: file.content_type,
                media_type,
            })
            .await
            .map_err(|e| {
                tracing::error!("Failed to store gallery media: {}", e);
                AppError::Storage(e)
            })?;

        let new_item = NewMediaItem {
            id: Uuid::now_v7(),
            title,
            caption,
            media_type,
            media_url: stored.url.clone(),
            storage_handle: stored.storage_handle.clone(),
        };

        let item = match self.repository.insert(new_item).await {
            Ok(item) => item,
            Err(e) => {
                let reference = MediaReference {
                    media_url: &stored.url,
                    storage_handle: stored.storage_handle.as_deref(),
                    media_type,
                };
                if let Err(cleanup) = self.storage.delete(&reference).await {
                    warn!(
                        "Failed to remove orphaned media {} after catalog error: {}",
                        stored.url, cleanup
                    );
                }
                return Err(e);
            }
        };

        info!(
            "Gallery item created: id={}, type={}, url={}",
            item.id, item.media_type, item.media_url
        );
        Ok(item.into())
    }

    pub async fn list(&self) -> Result<Vec<MediaItemDto>> {
        let items = self.repository.list_newest_first().await?;
        debug!("Listing {} gallery items", items.len());
        Ok(items.into_iter().map(Into::into).collect())
    }

    /// Removes an item. Stored bytes are removed best-effort first; the
    /// catalog record goes regardless of that outcome.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let item = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Gallery item {} not found", id)))?;

        if let Err(e) = self.storage.delete(&item.reference()).await {
            warn!(
                "Could not remove stored media for gallery item {} ({}): {}",
                item.id, item.media_url, e
            );
        }

        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound(format!("Gallery item {} not found", id)));
        }

        info!("Gallery item deleted: id={}", id);
        Ok(())
    }
}
