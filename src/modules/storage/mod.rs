//! Storage module for gallery media
//!
//! Two interchangeable backends sit behind [`MediaStore`]: a Cloudinary-style
//! object storage client and a local disk store served under `/uploads/gallery`.
//! [`MediaStorage`] picks the upload backend once at startup and routes
//! deletions by the item's own location.

mod cloudinary_client;
mod error;
mod local_disk;
mod media_store;

pub use cloudinary_client::CloudinaryClient;
pub use error::StorageError;
pub use local_disk::LocalDiskStore;
pub use media_store::{MediaReference, MediaStorage, MediaStore, MediaUpload, StoredMedia};
