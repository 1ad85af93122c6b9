use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::Path;

/// Guesses an image MIME type from the file extension alone.
///
/// Anything that is not `.png` or `.gif` is assumed to be JPEG.
pub fn mime_for_path(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        _ => "image/jpeg",
    }
}

pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}
