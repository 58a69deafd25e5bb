//! Turning local files into data URIs usable as message attachments.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::debug;

/// Read `path` and return it as a `data:{mime};base64,{data}` URI.
pub fn path_to_base64(path: impl AsRef<Path>) -> std::io::Result<String> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let mime = guess_mime_type(path);
    debug!(path = %path.display(), %mime, size = bytes.len(), "encoded attachment");
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

/// Guess a MIME type from the file extension, falling back to
/// `application/octet-stream`.
pub fn guess_mime_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string()
}
