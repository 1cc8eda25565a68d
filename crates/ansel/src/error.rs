use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnselError {
  #[error("Images directory not found: {}", path.display())]
  ImagesDirNotFound { path: PathBuf },

  #[error("I/O error on {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Failed to parse catalog {}: {source}", path.display())]
  CatalogParse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("Failed to serialize catalog: {0}")]
  CatalogSerialize(#[source] serde_json::Error),

  #[error("No API key configured; set NOVA_API_KEY or pass --api-key")]
  MissingApiKey,

  #[error("Model request failed: {message}")]
  ModelRequest { message: String },

  #[error("Model returned no choices for {model}")]
  EmptyModelResponse { model: String },
}

impl AnselError {
  pub fn images_dir_not_found(path: impl AsRef<Path>) -> Self {
    Self::ImagesDirNotFound { path: path.as_ref().to_path_buf() }
  }

  pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
    Self::Io { path: path.as_ref().to_path_buf(), source }
  }

  pub fn catalog_parse(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
    Self::CatalogParse { path: path.as_ref().to_path_buf(), source }
  }

  pub fn model_request(message: impl Into<String>) -> Self {
    Self::ModelRequest { message: message.into() }
  }

  pub fn empty_model_response(model: impl Into<String>) -> Self {
    Self::EmptyModelResponse { model: model.into() }
  }
}

impl From<reqwest::Error> for AnselError {
  fn from(err: reqwest::Error) -> Self {
    Self::model_request(err.to_string())
  }
}

pub type Result<T> = std::result::Result<T, AnselError>;
