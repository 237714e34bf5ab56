mod gallery_service;
mod migration_service;

pub use gallery_service::{GalleryService, UploadMedia, UploadedFile};
pub use migration_service::{GalleryMigrationService, MigrationOptions, MigrationSummary};
