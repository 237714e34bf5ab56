pub mod gallery_handler;

pub use gallery_handler::{
    __path_delete_media, __path_list_media, __path_upload_media, delete_media, list_media,
    upload_media,
};
