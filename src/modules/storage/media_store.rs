use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::StorageError;
use crate::shared::types::MediaType;

/// Bytes of an accepted upload, ready to be handed to a backend
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub data: Vec<u8>,
    pub original_filename: String,
    pub content_type: String,
    pub media_type: MediaType,
}

/// Where a backend put the bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    /// Publicly reachable URL (absolute for object storage, `/uploads/gallery/...` locally)
    pub url: String,
    /// Object storage deletion handle; `None` for local files
    pub storage_handle: Option<String>,
}

/// What a backend needs to remove previously stored bytes
#[derive(Debug, Clone, Copy)]
pub struct MediaReference<'a> {
    pub media_url: &'a str,
    pub storage_handle: Option<&'a str>,
    pub media_type: MediaType,
}

#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Short backend name used in logs
    fn backend_name(&self) -> &'static str;

    async fn store(&self, upload: MediaUpload) -> Result<StoredMedia, StorageError>;

    /// Removes stored bytes. Already-missing media counts as success.
    async fn delete(&self, reference: &MediaReference<'_>) -> Result<(), StorageError>;
}

/// Storage facade used by the gallery.
///
/// New uploads go to the backend chosen at startup. Deletion is routed by the
/// item itself: anything carrying a handle lives in object storage, anything
/// else on the local disk, whatever the active backend is.
#[derive(Clone)]
pub struct MediaStorage {
    local: Arc<dyn MediaStore>,
    remote: Option<Arc<dyn MediaStore>>,
}

impl MediaStorage {
    pub fn local_only(local: Arc<dyn MediaStore>) -> Self {
        Self {
            local,
            remote: None,
        }
    }

    pub fn with_object_storage(remote: Arc<dyn MediaStore>, local: Arc<dyn MediaStore>) -> Self {
        Self {
            local,
            remote: Some(remote),
        }
    }

    fn active(&self) -> &Arc<dyn MediaStore> {
        self.remote.as_ref().unwrap_or(&self.local)
    }

    pub fn active_backend(&self) -> &'static str {
        self.active().backend_name()
    }

    pub fn has_object_storage(&self) -> bool {
        self.remote.is_some()
    }

    pub async fn store(&self, upload: MediaUpload) -> Result<StoredMedia, StorageError> {
        let backend = self.active();
        debug!(
            "Storing '{}' ({} bytes) via {}",
            upload.original_filename,
            upload.data.len(),
            backend.backend_name()
        );
        backend.store(upload).await
    }

    /// Uploads straight to object storage regardless of the active backend
    pub async fn store_remote(&self, upload: MediaUpload) -> Result<StoredMedia, StorageError> {
        let remote = self
            .remote
            .as_ref()
            .ok_or_else(|| StorageError::configuration("object storage is not configured"))?;
        remote.store(upload).await
    }

    pub async fn delete(&self, reference: &MediaReference<'_>) -> Result<(), StorageError> {
        match (reference.storage_handle, &self.remote) {
            (Some(_), Some(remote)) => remote.delete(reference).await,
            (Some(handle), None) => {
                warn!(
                    "Cannot remove object '{}': object storage is not configured",
                    handle
                );
                Err(StorageError::configuration(
                    "object storage is not configured",
                ))
            }
            (None, _) => self.local.delete(reference).await,
        }
    }
}
