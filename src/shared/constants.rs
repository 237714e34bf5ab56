/// Default page size for admin list endpoints
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Upper bound on admin page size
pub const MAX_PAGE_SIZE: i64 = 200;

/// URL prefix under which locally stored gallery files are served
pub const LOCAL_GALLERY_URL_PREFIX: &str = "/uploads/gallery";

/// Directory (relative to the data root) holding locally stored gallery files
pub const LOCAL_GALLERY_DIR: &str = "uploads/gallery";

/// Extra room on the upload route body limit for multipart framing and text fields
pub const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Role carried by admin access tokens
pub const ROLE_ADMIN: &str = "admin";
