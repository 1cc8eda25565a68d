//! Ansel - photo categorization for the gallery
//!
//! Scans an images directory, asks a multimodal model to categorize every
//! photo that is not yet in `photos.json`, and rewrites the catalog.

pub mod catalog;
pub mod categorizer;
pub mod config;
pub mod display;
pub mod encoding;
pub mod error;
pub mod nova;
pub mod orchestrator;
pub mod photo;
pub mod response;
pub mod scanner;

pub use error::{AnselError, Result};
