use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Matches a locally served gallery URL and captures the stored file name.
    /// - Valid: "/uploads/gallery/1762722009348-alain.jpg"
    /// - Invalid: "/uploads/gallery/../secret", "/uploads/gallery/a/b.jpg", "https://x/y.jpg"
    pub static ref LOCAL_MEDIA_URL_REGEX: Regex =
        Regex::new(r"^/uploads/gallery/([^/\\]+)$").unwrap();
}

/// Extracts the stored file name from a local gallery URL.
///
/// Rejects anything that could escape the upload directory.
pub fn local_media_file_name(media_url: &str) -> Option<&str> {
    let name = LOCAL_MEDIA_URL_REGEX
        .captures(media_url)?
        .get(1)
        .map(|m| m.as_str())?;

    if name == "." || name == ".." {
        return None;
    }
    Some(name)
}

/// Trims a text value and returns `None` when nothing is left
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
