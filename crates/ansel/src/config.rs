//! Run configuration
//!
//! Built once from the command line and environment, then borrowed by
//! every component. Nothing here changes after startup.

use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "nova-2-lite-v1";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_API_BASE: &str = "https://api.nova.amazon.com/v1";
pub const DEFAULT_IMAGES_DIR: &str = "images";
pub const DEFAULT_PHOTOS_JSON: &str = "data/photos.json";

/// Connection and sampling settings for the vision model
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
  /// Model identifier sent with every request
  pub model: String,
  /// Sampling temperature
  pub temperature: f32,
  /// Base URL of the chat-completions API (e.g., "https://api.nova.amazon.com/v1")
  pub api_base: String,
  /// Bearer token; only required once a photo actually needs categorizing
  pub api_key: Option<String>,
}

impl Default for ModelConfig {
  fn default() -> Self {
    Self {
      model: DEFAULT_MODEL.to_string(),
      temperature: DEFAULT_TEMPERATURE,
      api_base: DEFAULT_API_BASE.to_string(),
      api_key: None,
    }
  }
}

impl ModelConfig {
  pub fn completions_url(&self) -> String {
    format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
  pub images_dir: PathBuf,
  pub photos_json: PathBuf,
  /// Print the catalog instead of writing it
  pub dry_run: bool,
  /// Re-categorize photos that are already catalogued
  pub force: bool,
  pub model: ModelConfig,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
      photos_json: PathBuf::from(DEFAULT_PHOTOS_JSON),
      dry_run: false,
      force: false,
      model: ModelConfig::default(),
    }
  }
}
