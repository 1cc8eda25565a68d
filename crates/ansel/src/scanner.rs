use std::fs;
use std::path::{Path, PathBuf};

use crate::{AnselError, Result};

/// Extensions accepted by the scanner, compared case-insensitively
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

pub fn is_supported_image(path: &Path) -> bool {
  path
    .extension()
    .and_then(|ext| ext.to_str())
    .map(|ext| SUPPORTED_EXTENSIONS.iter().any(|s| ext.eq_ignore_ascii_case(s)))
    .unwrap_or(false)
}

/// List the supported image files directly inside `dir`, sorted by path.
///
/// Subdirectories are not descended into.
pub fn scan_images(dir: &Path) -> Result<Vec<PathBuf>> {
  if !dir.exists() {
    return Err(AnselError::images_dir_not_found(dir));
  }

  let entries = fs::read_dir(dir).map_err(|e| AnselError::io(dir, e))?;

  let mut images = Vec::new();
  for entry in entries {
    let path = entry.map_err(|e| AnselError::io(dir, e))?.path();
    if path.is_file() && is_supported_image(&path) {
      images.push(path);
    }
  }

  images.sort();
  tracing::debug!(dir = %dir.display(), count = images.len(), "scanned images directory");
  Ok(images)
}
