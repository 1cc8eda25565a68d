//! Catalog persistence for `photos.json`
//!
//! The catalog is a JSON array of [`PhotoRecord`]s. Loading indexes it by
//! filename and keeps each entry exactly as it was written; an entry only
//! needs a `file`. Writing always replaces the whole file.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::photo::PhotoRecord;
use crate::{AnselError, Result};

/// Existing catalog entries keyed by `file`
pub type CatalogIndex = HashMap<String, PhotoRecord>;

/// Load the catalog at `path` and index it by filename.
///
/// A missing file is an empty catalog.
pub fn load_existing(path: &Path) -> Result<CatalogIndex> {
  let content = match fs::read_to_string(path) {
    Ok(content) => content,
    Err(e) if e.kind() == ErrorKind::NotFound => {
      tracing::debug!(path = %path.display(), "no existing catalog");
      return Ok(CatalogIndex::new());
    }
    Err(e) => return Err(AnselError::io(path, e)),
  };

  let photos: Vec<PhotoRecord> =
    serde_json::from_str(&content).map_err(|e| AnselError::catalog_parse(path, e))?;

  tracing::debug!(path = %path.display(), count = photos.len(), "loaded existing catalog");
  Ok(photos.into_iter().map(|photo| (photo.file().to_string(), photo)).collect())
}

/// Render records as the pretty-printed JSON array written to disk
pub fn render(photos: &[PhotoRecord]) -> Result<String> {
  serde_json::to_string_pretty(photos).map_err(AnselError::CatalogSerialize)
}

/// Overwrite the catalog at `path` with `photos`.
pub fn write(path: &Path, photos: &[PhotoRecord]) -> Result<()> {
  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    fs::create_dir_all(parent).map_err(|e| AnselError::io(parent, e))?;
  }

  let mut json = render(photos)?;
  json.push('\n');
  fs::write(path, json).map_err(|e| AnselError::io(path, e))?;

  tracing::debug!(path = %path.display(), count = photos.len(), "wrote catalog");
  Ok(())
}
