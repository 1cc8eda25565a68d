use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fs;
use std::path::Path;

use crate::{AnselError, Result};

const DEFAULT_MIME: &str = "image/jpeg";

/// MIME type for an image path, by lowercase extension
pub fn mime_type(path: &Path) -> &'static str {
  let ext = path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase());

  match ext.as_deref() {
    Some("jpg") | Some("jpeg") => "image/jpeg",
    Some("png") => "image/png",
    Some("gif") => "image/gif",
    Some("webp") => "image/webp",
    _ => DEFAULT_MIME,
  }
}

pub fn data_url(mime: &str, bytes: &[u8]) -> String {
  format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Read an image file and encode it as a base64 `data:` URL
pub fn encode_image(path: &Path) -> Result<String> {
  let bytes = fs::read(path).map_err(|e| AnselError::io(path, e))?;
  Ok(data_url(mime_type(path), &bytes))
}
