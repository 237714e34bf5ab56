use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::core::error::{AppError, Result};
use crate::features::gallery::models::MediaItem;
use crate::features::gallery::repositories::MediaRepository;
use crate::modules::storage::{LocalDiskStore, MediaStorage, MediaUpload};
use crate::shared::types::MediaType;
use crate::shared::validation::local_media_file_name;

#[derive(Debug, Clone, Default)]
pub struct MigrationOptions {
    /// Report what would be migrated without uploading or updating anything
    pub dry_run: bool,
    /// Remove each local file once its item points at object storage
    pub remove_local: bool,
    /// Extra directories searched after the gallery directory
    pub search_dirs: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationSummary {
    pub candidates: usize,
    pub migrated: usize,
    pub skipped: usize,
    pub failed: usize,
}

enum ItemOutcome {
    Migrated,
    Skipped,
}

/// Moves locally stored gallery items into object storage
pub struct GalleryMigrationService {
    repository: Arc<dyn MediaRepository>,
    storage: MediaStorage,
    local: Arc<LocalDiskStore>,
}

impl GalleryMigrationService {
    pub fn new(
        repository: Arc<dyn MediaRepository>,
        storage: MediaStorage,
        local: Arc<LocalDiskStore>,
    ) -> Self {
        Self {
            repository,
            storage,
            local,
        }
    }

    pub async fn run(&self, options: &MigrationOptions) -> Result<MigrationSummary> {
        if !self.storage.has_object_storage() {
            return Err(AppError::BadRequest(
                "Object storage credentials are required to migrate the gallery".to_string(),
            ));
        }

        let items = self.repository.list_local_only().await?;
        let mut summary = MigrationSummary {
            candidates: items.len(),
            ..Default::default()
        };
        info!(
            "Found {} locally stored gallery items{}",
            items.len(),
            if options.dry_run { " (dry run)" } else { "" }
        );

        for item in &items {
            match self.migrate_item(item, options).await {
                Ok(ItemOutcome::Migrated) => summary.migrated += 1,
                Ok(ItemOutcome::Skipped) => summary.skipped += 1,
                Err(e) => {
                    error!("Failed to migrate gallery item {}: {}", item.id, e);
                    summary.failed += 1;
                }
            }
        }

        info!(
            "Gallery migration finished: migrated={}, skipped={}, failed={}",
            summary.migrated, summary.skipped, summary.failed
        );
        Ok(summary)
    }

    async fn migrate_item(&self, item: &MediaItem, options: &MigrationOptions) -> Result<ItemOutcome> {
        let Some(file_name) = local_media_file_name(&item.media_url) else {
            warn!(
                "Skipping gallery item {}: unusable local URL {}",
                item.id, item.media_url
            );
            return Ok(ItemOutcome::Skipped);
        };

        let Some(path) = self.local.locate(file_name, &options.search_dirs).await else {
            warn!(
                "Skipping gallery item {}: file {} not found",
                item.id, file_name
            );
            return Ok(ItemOutcome::Skipped);
        };

        if options.dry_run {
            info!(
                "Would migrate gallery item {} from {}",
                item.id,
                path.display()
            );
            return Ok(ItemOutcome::Migrated);
        }

        let data = tokio::fs::read(&path)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to read {}: {}", path.display(), e)))?;

        let stored = self
            .storage
            .store_remote(MediaUpload {
                data,
                original_filename: file_name.to_string(),
                content_type: content_type_for(&path, item.media_type).to_string(),
                media_type: item.media_type,
            })
            .await?;

        self.repository
            .update_location(item.id, &stored.url, stored.storage_handle.as_deref())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Gallery item {} disappeared", item.id)))?;

        info!("Migrated gallery item {} to {}", item.id, stored.url);

        if options.remove_local {
            if let Err(e) = tokio::fs::remove_file(&path).await {
                warn!("Could not remove {}: {}", path.display(), e);
            }
        }

        Ok(ItemOutcome::Migrated)
    }
}

/// Content type from the file extension, falling back on the item's media type
fn content_type_for(path: &Path, media_type: MediaType) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("mp4") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("webm") => "video/webm",
        _ => match media_type {
            MediaType::Video => "video/mp4",
            MediaType::Image => "application/octet-stream",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::gallery::models::NewMediaItem;
    use crate::shared::test_helpers::{InMemoryMediaRepository, MockRemoteStore};
    use uuid::Uuid;

    struct Fixture {
        _dir: tempfile::TempDir,
        local: Arc<LocalDiskStore>,
        remote: Arc<MockRemoteStore>,
        repo: Arc<InMemoryMediaRepository>,
        service: GalleryMigrationService,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let local = Arc::new(LocalDiskStore::new(dir.path()));
        let remote = Arc::new(MockRemoteStore::new());
        let repo = Arc::new(InMemoryMediaRepository::default());
        let service = GalleryMigrationService::new(
            repo.clone(),
            MediaStorage::with_object_storage(remote.clone(), local.clone()),
            local.clone(),
        );
        Fixture {
            _dir: dir,
            local,
            remote,
            repo,
            service,
        }
    }

    async fn seed_local(fixture: &Fixture, file_name: &str, write_file: bool) -> Uuid {
        if write_file {
            fixture.local.ensure_directory().await.unwrap();
            tokio::fs::write(fixture.local.directory().join(file_name), b"jpeg")
                .await
                .unwrap();
        }
        let item = fixture
            .repo
            .insert(NewMediaItem {
                id: Uuid::now_v7(),
                title: "Old".to_string(),
                caption: None,
                media_type: MediaType::Image,
                media_url: LocalDiskStore::url_for(file_name),
                storage_handle: None,
            })
            .await
            .unwrap();
        item.id
    }

    #[tokio::test]
    async fn test_migrates_found_files_and_skips_missing() {
        let fixture = fixture();
        let present = seed_local(&fixture, "1-present.jpg", true).await;
        seed_local(&fixture, "2-missing.jpg", false).await;

        let summary = fixture
            .service
            .run(&MigrationOptions {
                remove_local: true,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(
            summary,
            MigrationSummary {
                candidates: 2,
                migrated: 1,
                skipped: 1,
                failed: 0
            }
        );

        let migrated = fixture.repo.find_by_id(present).await.unwrap().unwrap();
        assert!(migrated.storage_handle.is_some());
        assert!(migrated.media_url.starts_with("https://"));
        assert!(!fixture.local.directory().join("1-present.jpg").exists());
    }

    #[tokio::test]
    async fn test_dry_run_changes_nothing() {
        let fixture = fixture();
        let id = seed_local(&fixture, "1-present.jpg", true).await;

        let summary = fixture
            .service
            .run(&MigrationOptions {
                dry_run: true,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(summary.migrated, 1);
        assert_eq!(fixture.remote.stored_count(), 0);
        let item = fixture.repo.find_by_id(id).await.unwrap().unwrap();
        assert!(item.storage_handle.is_none());
        assert!(fixture.local.directory().join("1-present.jpg").exists());
    }

    #[tokio::test]
    async fn test_requires_object_storage() {
        let dir = tempfile::tempdir().unwrap();
        let local = Arc::new(LocalDiskStore::new(dir.path()));
        let service = GalleryMigrationService::new(
            Arc::new(InMemoryMediaRepository::default()),
            MediaStorage::local_only(local.clone()),
            local,
        );

        assert!(service.run(&MigrationOptions::default()).await.is_err());
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(
            content_type_for(Path::new("a/1-x.JPG"), MediaType::Image),
            "image/jpeg"
        );
        assert_eq!(
            content_type_for(Path::new("1-clip"), MediaType::Video),
            "video/mp4"
        );
    }
}
