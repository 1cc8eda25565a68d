//! Categorizer client
//!
//! Encodes one image, asks the vision model about it, and turns the reply
//! into a [`Categorization`]. A reply that cannot be parsed never fails the
//! run; it is logged and replaced with the fallback.

use async_trait::async_trait;
use std::path::Path;

use crate::encoding;
use crate::photo::Categorization;
use crate::response;
use crate::Result;

pub const PROMPT: &str = r#"Analyze this photograph and provide:
1. Category: Choose ONE from [landscape, portrait, street, nature]
2. Title: A short, descriptive title (3-6 words)
3. Description: A brief description (1-2 sentences)

Format your response as JSON:
{
  "category": "landscape|portrait|street|nature",
  "title": "Photo Title Here",
  "description": "Brief description here."
}"#;

/// A multimodal model that answers a text prompt about one image
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisionModel: Send + Sync {
  /// Send `prompt` with the image at `image_url` (a `data:` URL) and
  /// return the model's text reply.
  async fn complete(&self, prompt: &str, image_url: &str) -> Result<String>;
}

/// Whether a categorization came from the model or the fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
  Model,
  Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
  pub categorization: Categorization,
  pub source: Source,
}

pub struct Categorizer<'a> {
  model: &'a dyn VisionModel,
}

impl<'a> Categorizer<'a> {
  pub fn new(model: &'a dyn VisionModel) -> Self {
    Self { model }
  }

  /// Categorize the image at `path`.
  ///
  /// Reading the file and the model call itself can fail; parsing the
  /// reply cannot.
  pub async fn categorize(&self, path: &Path) -> Result<Outcome> {
    let image_url = encoding::encode_image(path)?;
    let reply = self.model.complete(PROMPT, &image_url).await?;
    Ok(interpret(path, &reply))
  }
}

/// Parse a reply, falling back to a filename-derived record on failure
pub fn interpret(path: &Path, reply: &str) -> Outcome {
  match response::parse(reply) {
    Ok(categorization) => Outcome { categorization, source: Source::Model },
    Err(e) => {
      tracing::warn!(
        path = %path.display(),
        error = %e,
        response = %reply,
        "failed to parse model response, using fallback"
      );
      Outcome { categorization: response::fallback(path), source: Source::Fallback }
    }
  }
}
