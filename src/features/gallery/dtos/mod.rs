mod media_dto;

pub use media_dto::{DeletedMediaDto, MediaItemDto, UploadMediaForm};
