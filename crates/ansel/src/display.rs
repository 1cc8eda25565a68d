//! Progress output for the terminal
//!
//! Everything the operator reads goes to stdout; diagnostics go through
//! `tracing` to stderr.

use colored::*;
use std::path::Path;

use crate::photo::Categorization;

pub fn initializing(model: &str) {
  println!("{} {}...", "Initializing".cyan(), model.bold());
}

/// Directory name without trailing separators, so `images/` prints as `images`
pub fn dir_label(dir: &Path) -> String {
  let shown = dir.display().to_string();
  let trimmed = shown.trim_end_matches(['/', '\\']);
  if trimmed.is_empty() {
    shown
  } else {
    trimmed.to_string()
  }
}

pub fn scanning(dir: &Path) {
  println!("\nScanning {}/ for photos...", dir_label(dir));
}

pub fn found(count: usize) {
  println!("Found {} images", count.to_string().bold());
}

pub fn no_images(dir: &Path) {
  println!("{}", format!("No images found. Add photos to {}/ directory first.", dir_label(dir)).yellow());
}

pub fn skipping(file: &str) {
  println!("{} {} (already catalogued)", "Skipping".dimmed(), file);
}

pub fn categorizing(path: &Path) {
  println!("{} {}", "Categorizing:".blue().bold(), path.display());
}

pub fn categorized(result: &Categorization, fallback: bool) {
  let category = if fallback {
    format!("{} (fallback)", result.category).yellow()
  } else {
    result.category.to_string().green()
  };

  println!("  Category: {category}");
  println!("  Title: {}", result.title);
  println!("  Description: {}\n", result.description);
}

pub fn dry_run_preview(catalog: &Path, json: &str) {
  let name = catalog.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
  println!("\n{} Would update {} with:", "[DRY RUN]".yellow().bold(), name);
  println!("{json}");
}

pub fn updated(catalog: &Path, count: usize) {
  println!("\n{} Updated {} with {} photos", "✓".green().bold(), catalog.display(), count);
}
