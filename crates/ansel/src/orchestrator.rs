//! Main flow: scan, reuse or categorize, then write or preview.
//!
//! Photos are handled one at a time in scan order. The catalog on disk is
//! only touched once, after every photo has been processed.

use std::path::PathBuf;

use crate::catalog::{self, CatalogIndex};
use crate::categorizer::{Categorizer, Source, VisionModel};
use crate::config::Settings;
use crate::display;
use crate::photo::{file_name, PhotoRecord};
use crate::scanner;
use crate::Result;

/// What a run did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
  /// Images found in the scanned directory
  pub found: usize,
  /// Records carried over from the existing catalog
  pub reused: usize,
  /// Images sent to the model
  pub categorized: usize,
  /// Of those, how many fell back to a placeholder record
  pub fallbacks: usize,
  /// Whether the catalog file was written
  pub written: bool,
  /// Records in the resulting catalog, in scan order
  pub photos: Vec<PhotoRecord>,
}

/// Run a full categorization pass with the given settings and model.
pub async fn run(settings: &Settings, model: &dyn VisionModel) -> Result<RunSummary> {
  display::scanning(&settings.images_dir);
  let images = scanner::scan_images(&settings.images_dir)?;
  display::found(images.len());

  if images.is_empty() {
    display::no_images(&settings.images_dir);
    return Ok(RunSummary::default());
  }

  let existing = catalog::load_existing(&settings.photos_json)?;
  let mut summary = build_catalog(&images, &existing, model, settings.force).await?;

  if settings.dry_run {
    display::dry_run_preview(&settings.photos_json, &catalog::render(&summary.photos)?);
  } else {
    catalog::write(&settings.photos_json, &summary.photos)?;
    summary.written = true;
    display::updated(&settings.photos_json, summary.photos.len());
  }

  Ok(summary)
}

/// Produce one record per image, reusing catalogued ones unless `force` is set.
pub async fn build_catalog(
  images: &[PathBuf],
  existing: &CatalogIndex,
  model: &dyn VisionModel,
  force: bool,
) -> Result<RunSummary> {
  let categorizer = Categorizer::new(model);
  let mut summary = RunSummary { found: images.len(), ..RunSummary::default() };

  for path in images {
    let filename = file_name(path);

    if !force {
      if let Some(record) = existing.get(&filename) {
        display::skipping(&filename);
        summary.reused += 1;
        summary.photos.push(record.clone());
        continue;
      }
    }

    display::categorizing(path);
    let outcome = categorizer.categorize(path).await?;
    let fallback = outcome.source == Source::Fallback;
    display::categorized(&outcome.categorization, fallback);

    summary.categorized += 1;
    if fallback {
      summary.fallbacks += 1;
    }
    summary.photos.push(PhotoRecord::from_categorization(path, outcome.categorization));
  }

  tracing::info!(
    found = summary.found,
    reused = summary.reused,
    categorized = summary.categorized,
    fallbacks = summary.fallbacks,
    "catalog built"
  );

  Ok(summary)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::categorizer::MockVisionModel;
  use crate::photo::Category;
  use crate::AnselError;
  use std::fs;
  use std::path::Path;
  use tempfile::TempDir;

  const NATURE_REPLY: &str = r#"{"category":"nature","title":"Fern","description":"A fern."}"#;

  struct Fixture {
    _temp: TempDir,
    settings: Settings,
  }

  fn fixture(images: &[&str]) -> Fixture {
    let temp = TempDir::new().unwrap();
    let images_dir = temp.path().join("images");
    fs::create_dir(&images_dir).unwrap();
    for name in images {
      fs::write(images_dir.join(name), b"pixels").unwrap();
    }

    let settings = Settings {
      images_dir,
      photos_json: temp.path().join("data").join("photos.json"),
      ..Settings::default()
    };

    Fixture { _temp: temp, settings }
  }

  fn write_catalog(path: &Path, json: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, json).unwrap();
  }

  #[tokio::test]
  async fn test_new_images_are_categorized_in_scan_order() {
    let fx = fixture(&["b.jpg", "a.png"]);
    let mut model = MockVisionModel::new();
    model.expect_complete().times(2).returning(|_, _| Ok(NATURE_REPLY.to_string()));

    let summary = run(&fx.settings, &model).await.unwrap();

    assert_eq!(summary.found, 2);
    assert_eq!(summary.categorized, 2);
    assert!(summary.written);

    let index = catalog::load_existing(&fx.settings.photos_json).unwrap();
    assert_eq!(index["a.png"].id(), Some("a"));
    assert_eq!(index["b.jpg"].category(), Some(Category::Nature));

    let files: Vec<_> = summary.photos.iter().map(|p| p.file()).collect();
    assert_eq!(files, vec!["a.png", "b.jpg"]);
  }

  #[tokio::test]
  async fn test_catalogued_images_are_reused_verbatim() {
    let fx = fixture(&["a.jpg", "b.jpg"]);
    let existing = r#"[{"id":"a","file":"a.jpg","category":"street","title":"Kept","description":"Hand written.","featured":true}]"#;
    write_catalog(&fx.settings.photos_json, existing);

    let mut model = MockVisionModel::new();
    model.expect_complete().times(1).returning(|_, _| Ok(NATURE_REPLY.to_string()));

    let summary = run(&fx.settings, &model).await.unwrap();

    assert_eq!(summary.reused, 1);
    assert_eq!(summary.categorized, 1);
    assert_eq!(summary.photos[0].title(), Some("Kept"));
    assert_eq!(summary.photos[0].get("featured"), Some(&serde_json::Value::Bool(true)));
    assert_eq!(summary.photos[1].title(), Some("Fern"));
  }

  #[tokio::test]
  async fn test_second_run_is_idempotent() {
    let fx = fixture(&["a.jpg", "b.jpg"]);
    let mut model = MockVisionModel::new();
    model.expect_complete().times(2).returning(|_, _| Ok(NATURE_REPLY.to_string()));
    run(&fx.settings, &model).await.unwrap();
    let first = fs::read_to_string(&fx.settings.photos_json).unwrap();

    let mut idle = MockVisionModel::new();
    idle.expect_complete().times(0);
    let summary = run(&fx.settings, &idle).await.unwrap();
    let second = fs::read_to_string(&fx.settings.photos_json).unwrap();

    assert_eq!(summary.reused, 2);
    assert_eq!(first, second);
  }

  #[tokio::test]
  async fn test_loose_catalog_entries_are_reused_untouched() {
    let fx = fixture(&["a.jpg", "b.jpg"]);
    let existing = "[\n  {\n    \"id\": \"a\",\n    \"file\": \"a.jpg\",\n    \"category\": \"street\",\n    \"title\": \"Kept\"\n  },\n  {\n    \"file\": \"b.jpg\",\n    \"category\": \"architecture\"\n  }\n]\n";
    write_catalog(&fx.settings.photos_json, existing);

    let mut model = MockVisionModel::new();
    model.expect_complete().times(0);

    let summary = run(&fx.settings, &model).await.unwrap();

    assert_eq!(summary.reused, 2);
    assert_eq!(summary.photos[0].description(), None);
    assert_eq!(summary.photos[1].category(), None);
    assert_eq!(fs::read_to_string(&fx.settings.photos_json).unwrap(), existing);
  }

  #[tokio::test]
  async fn test_reused_entries_keep_their_key_order() {
    let fx = fixture(&["a.jpg"]);
    let existing = "[\n  {\n    \"file\": \"a.jpg\",\n    \"id\": \"a\",\n    \"category\": \"nature\",\n    \"title\": \"Fern\",\n    \"description\": \"A fern.\"\n  }\n]\n";
    write_catalog(&fx.settings.photos_json, existing);

    let mut model = MockVisionModel::new();
    model.expect_complete().times(0);

    run(&fx.settings, &model).await.unwrap();

    assert_eq!(fs::read_to_string(&fx.settings.photos_json).unwrap(), existing);
  }

  #[tokio::test]
  async fn test_force_replaces_existing_records() {
    let mut fx = fixture(&["a.jpg"]);
    write_catalog(
      &fx.settings.photos_json,
      r#"[{"id":"a","file":"a.jpg","category":"street","title":"Old","description":"Old."}]"#,
    );
    fx.settings.force = true;

    let mut model = MockVisionModel::new();
    model.expect_complete().times(1).returning(|_, _| Ok(NATURE_REPLY.to_string()));

    let summary = run(&fx.settings, &model).await.unwrap();

    assert_eq!(summary.reused, 0);
    assert_eq!(summary.photos[0].title(), Some("Fern"));
  }

  #[tokio::test]
  async fn test_dry_run_never_writes() {
    let mut fx = fixture(&["a.jpg"]);
    let before = r#"[{"id":"z","file":"z.jpg","category":"street","title":"Z","description":"Z."}]"#;
    write_catalog(&fx.settings.photos_json, before);
    fx.settings.dry_run = true;

    let mut model = MockVisionModel::new();
    model.expect_complete().times(1).returning(|_, _| Ok(NATURE_REPLY.to_string()));

    let summary = run(&fx.settings, &model).await.unwrap();

    assert!(!summary.written);
    assert_eq!(summary.photos.len(), 1);
    assert_eq!(fs::read_to_string(&fx.settings.photos_json).unwrap(), before);
  }

  #[tokio::test]
  async fn test_empty_directory_leaves_catalog_untouched() {
    let fx = fixture(&["notes.txt"]);
    // Unparseable on purpose: loading it would fail the run
    write_catalog(&fx.settings.photos_json, "not a catalog");

    let mut model = MockVisionModel::new();
    model.expect_complete().times(0);

    let summary = run(&fx.settings, &model).await.unwrap();

    assert_eq!(summary, RunSummary::default());
    assert_eq!(fs::read_to_string(&fx.settings.photos_json).unwrap(), "not a catalog");
  }

  #[tokio::test]
  async fn test_fallback_is_counted_and_recorded() {
    let fx = fixture(&["misty_harbor-dawn.webp"]);
    let mut model = MockVisionModel::new();
    model.expect_complete().times(1).returning(|_, _| Ok("no json here".to_string()));

    let summary = run(&fx.settings, &model).await.unwrap();

    assert_eq!(summary.fallbacks, 1);
    let record = &summary.photos[0];
    assert_eq!(record.id(), Some("misty_harbor-dawn"));
    assert_eq!(record.category(), Some(Category::Landscape));
    assert_eq!(record.title(), Some("Misty Harbor Dawn"));
    assert_eq!(record.description(), Some("Photo description unavailable."));
  }

  #[tokio::test]
  async fn test_missing_images_dir_aborts() {
    let fx = fixture(&[]);
    let settings = Settings { images_dir: fx.settings.images_dir.join("missing"), ..fx.settings.clone() };

    let model = MockVisionModel::new();
    let err = run(&settings, &model).await.unwrap_err();

    assert!(matches!(err, AnselError::ImagesDirNotFound { .. }));
    assert!(!settings.photos_json.exists());
  }

  #[tokio::test]
  async fn test_model_failure_aborts_without_writing() {
    let fx = fixture(&["a.jpg"]);
    let mut model = MockVisionModel::new();
    model.expect_complete().times(1).returning(|_, _| Err(AnselError::model_request("boom")));

    let result = run(&fx.settings, &model).await;

    assert!(result.is_err());
    assert!(!fx.settings.photos_json.exists());
  }
}
