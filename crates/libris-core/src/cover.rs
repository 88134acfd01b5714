//! Cover image URIs
//!
//! Records always carry a displayable image: the Open Library cover for a
//! known cover id, a placeholder otherwise, or a `data:` URI built from a
//! file the user picked in the add form.

use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine};
use thiserror::Error;

pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/150";
pub const COVERS_BASE_URL: &str = "https://covers.openlibrary.org/b/id";

#[derive(Error, Debug)]
pub enum CoverError {
    #[error("Failed to read cover image {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Medium-size cover URL for an Open Library cover id.
pub fn cover_url(cover_id: i64) -> String {
    format!("{}/{}-M.jpg", COVERS_BASE_URL, cover_id)
}

/// Cover URL when the upstream work has a usable cover id, placeholder otherwise.
pub fn cover_or_placeholder(cover_id: Option<i64>) -> String {
    match cover_id {
        Some(id) if id > 0 => cover_url(id),
        _ => PLACEHOLDER_IMAGE.to_string(),
    }
}

/// Encode raw image bytes as a `data:` URI.
pub fn data_uri_from_bytes(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Read an image file and encode it as a `data:` URI.
///
/// Resolves only once the whole file has been read, so a record built from
/// the result always holds a complete image value.
pub async fn data_uri_from_file(path: impl AsRef<Path>) -> Result<String, CoverError> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await.map_err(|source| CoverError::Io {
        path: path.display().to_string(),
        source,
    })?;
    tracing::debug!("Encoded {} byte cover image from {:?}", bytes.len(), path);
    Ok(data_uri_from_bytes(&bytes, mime_for_path(path)))
}

/// Guess an image MIME type from a file extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}
