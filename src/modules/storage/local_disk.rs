use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};

use super::{MediaReference, MediaStore, MediaUpload, StoredMedia, StorageError};
use crate::shared::constants::{LOCAL_GALLERY_DIR, LOCAL_GALLERY_URL_PREFIX};
use crate::shared::validation::local_media_file_name;

/// Gallery storage on the server's own disk.
///
/// Files are written to `{data_root}/uploads/gallery` and served from
/// `/uploads/gallery/{name}`. Names are `{stamp}-{sanitized original}` where the
/// millisecond stamp never repeats within one store, so two uploads of the
/// same file in the same millisecond still land in different files.
pub struct LocalDiskStore {
    directory: PathBuf,
    last_stamp: AtomicU64,
}

impl LocalDiskStore {
    const FALLBACK_FILE_NAME: &'static str = "upload";

    pub fn new(data_root: &Path) -> Self {
        Self {
            directory: data_root.join(LOCAL_GALLERY_DIR),
            last_stamp: AtomicU64::new(0),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub async fn ensure_directory(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.directory).await?;
        Ok(())
    }

    /// Strictly increasing millisecond stamp
    fn next_stamp(&self) -> u64 {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        let previous = self
            .last_stamp
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        now.max(previous + 1)
    }

    pub fn stored_file_name(&self, original_filename: &str) -> String {
        let sanitized = sanitize_filename::sanitize(original_filename.trim());
        let name = if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
            Self::FALLBACK_FILE_NAME.to_string()
        } else {
            sanitized
        };
        format!("{}-{}", self.next_stamp(), name)
    }

    pub fn url_for(file_name: &str) -> String {
        format!("{}/{}", LOCAL_GALLERY_URL_PREFIX, file_name)
    }

    /// Maps a local gallery URL back to its file; `None` for anything else
    pub fn path_for_url(&self, media_url: &str) -> Option<PathBuf> {
        local_media_file_name(media_url).map(|name| self.directory.join(name))
    }

    /// Looks for a stored file in the gallery directory, then in `extra_dirs`
    pub async fn locate(&self, file_name: &str, extra_dirs: &[PathBuf]) -> Option<PathBuf> {
        let candidates = std::iter::once(self.directory.as_path())
            .chain(extra_dirs.iter().map(PathBuf::as_path))
            .map(|dir| dir.join(file_name));

        for candidate in candidates {
            if tokio::fs::try_exists(&candidate).await.unwrap_or(false) {
                return Some(candidate);
            }
        }
        None
    }
}

#[async_trait]
impl MediaStore for LocalDiskStore {
    fn backend_name(&self) -> &'static str {
        "local-disk"
    }

    async fn store(&self, upload: MediaUpload) -> Result<StoredMedia, StorageError> {
        self.ensure_directory().await?;

        let file_name = self.stored_file_name(&upload.original_filename);
        let path = self.directory.join(&file_name);
        tokio::fs::write(&path, &upload.data).await?;

        info!("Stored {} bytes at {}", upload.data.len(), path.display());

        Ok(StoredMedia {
            url: Self::url_for(&file_name),
            storage_handle: None,
        })
    }

    async fn delete(&self, reference: &MediaReference<'_>) -> Result<(), StorageError> {
        let path = self.path_for_url(reference.media_url).ok_or_else(|| {
            StorageError::invalid_reference(format!(
                "'{}' is not a local gallery URL",
                reference.media_url
            ))
        })?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                info!("Removed local media {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Local media {} already gone", path.display());
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
