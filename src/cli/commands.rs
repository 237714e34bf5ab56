use std::path::PathBuf;
use std::sync::Arc;

use crate::core::app::{build_media_storage, http_client};
use crate::core::config::Config;
use crate::core::database;
use crate::features::auth::services::password;
use crate::features::gallery::dtos::MediaItemDto;
use crate::features::gallery::services::MigrationOptions;
use crate::features::gallery::{GalleryMigrationService, MediaRepository, PgMediaRepository};

pub async fn migrate_gallery(
    config: &Config,
    dry_run: bool,
    remove_local: bool,
    search_dirs: Vec<PathBuf>,
) -> anyhow::Result<()> {
    let pool = database::create_pool(&config.database).await?;
    database::run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

    let (storage, local) = build_media_storage(config, http_client()?).await?;
    let service = GalleryMigrationService::new(
        Arc::new(PgMediaRepository::new(pool)),
        storage,
        local,
    );

    let summary = service
        .run(&MigrationOptions {
            dry_run,
            remove_local,
            search_dirs,
        })
        .await?;

    println!(
        "{}candidates={} migrated={} skipped={} failed={}",
        if dry_run { "[dry run] " } else { "" },
        summary.candidates,
        summary.migrated,
        summary.skipped,
        summary.failed
    );
    Ok(())
}

pub async fn check_gallery(config: &Config) -> anyhow::Result<()> {
    let pool = database::create_pool(&config.database).await?;
    let repository = PgMediaRepository::new(pool);

    let items = repository.list_newest_first().await?;
    println!("gallery items: {}", items.len());
    for item in items {
        println!("{}", serde_json::to_string(&MediaItemDto::from(item))?);
    }
    Ok(())
}

pub fn hash_password(plain: &str) -> anyhow::Result<()> {
    let hash = password::hash_password(plain)?;
    println!("{}", hash);
    Ok(())
}
