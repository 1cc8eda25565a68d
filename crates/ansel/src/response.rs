//! Interpreting the model's reply
//!
//! Models often wrap their JSON in a markdown code fence. The fence is
//! trimmed line-wise before deserializing. Anything that still fails to
//! parse into a [`Categorization`] is replaced by [`fallback`].

use std::path::Path;
use thiserror::Error;

use crate::photo::{file_stem, Categorization, Category};

pub const FALLBACK_DESCRIPTION: &str = "Photo description unavailable.";

/// Why a model reply could not be read as a categorization
#[derive(Error, Debug)]
pub enum ResponseError {
  #[error("code fence has no body")]
  EmptyFence,

  #[error(transparent)]
  Json(#[from] serde_json::Error),
}

/// Strip an enclosing triple-backtick block.
///
/// When the trimmed text opens with a fence, the first line and the last
/// line are dropped, then a leading `json` tag is removed from what is
/// left. Returns `None` for a fence with nothing after its opening line.
pub fn strip_code_fence(content: &str) -> Option<&str> {
  let content = content.trim();
  if !content.starts_with("```") {
    return Some(content);
  }

  let (_, rest) = content.split_once('\n')?;
  let body = match rest.rfind('\n') {
    Some(idx) => &rest[..idx],
    None => rest,
  };

  match body.strip_prefix("json") {
    Some(tagged) => Some(tagged.trim()),
    None => Some(body),
  }
}

/// Parse a raw model reply into a categorization
pub fn parse(content: &str) -> Result<Categorization, ResponseError> {
  let body = strip_code_fence(content).ok_or(ResponseError::EmptyFence)?;
  Ok(serde_json::from_str(body)?)
}

/// Title-case a string: a cased letter is uppercased when it follows an
/// uncased character and lowercased otherwise. Caseless letters such as
/// CJK ideographs end a word.
pub fn title_case(text: &str) -> String {
  let mut result = String::with_capacity(text.len());
  let mut in_word = false;

  for c in text.chars() {
    if c.is_lowercase() || c.is_uppercase() {
      if in_word {
        result.extend(c.to_lowercase());
      } else {
        result.extend(c.to_uppercase());
      }
      in_word = true;
    } else {
      result.push(c);
      in_word = false;
    }
  }

  result
}

/// Readable title derived from a filename stem
pub fn title_from_path(path: &Path) -> String {
  title_case(&file_stem(path).replace(['-', '_'], " "))
}

/// The placeholder used when the model reply cannot be parsed
pub fn fallback(path: &Path) -> Categorization {
  Categorization {
    category: Category::Landscape,
    title: title_from_path(path),
    description: FALLBACK_DESCRIPTION.to_string(),
  }
}
