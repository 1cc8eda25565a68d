//! Catalog data model
//!
//! A `PhotoRecord` is one entry of `photos.json`. `Categorization` is the
//! three-field answer the categorizer produces for a single image, either
//! from the model or from the fallback.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// The closed set of gallery categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
  Landscape,
  Portrait,
  Street,
  Nature,
}

const CATEGORY_NAMES: &[&str] = &["landscape", "portrait", "street", "nature"];

impl Category {
  pub fn as_str(&self) -> &'static str {
    match self {
      Category::Landscape => "landscape",
      Category::Portrait => "portrait",
      Category::Street => "street",
      Category::Nature => "nature",
    }
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Case-insensitive; models are not consistent about capitalization
impl FromStr for Category {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "landscape" => Ok(Category::Landscape),
      "portrait" => Ok(Category::Portrait),
      "street" => Ok(Category::Street),
      "nature" => Ok(Category::Nature),
      _ => Err(s.to_string()),
    }
  }
}

impl<'de> Deserialize<'de> for Category {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(|raw: String| de::Error::unknown_variant(&raw, CATEGORY_NAMES))
  }
}

/// Category, title and description for one image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Categorization {
  pub category: Category,
  pub title: String,
  pub description: String,
}

/// One catalog entry.
///
/// Holds the entry's JSON object as-is so that records reused from an
/// existing catalog are written back with the same keys in the same order.
/// The only key every record must carry is a string `file`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PhotoRecord {
  fields: Map<String, Value>,
}

impl<'de> Deserialize<'de> for PhotoRecord {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let fields = Map::deserialize(deserializer)?;
    match fields.get("file") {
      Some(Value::String(_)) => Ok(Self { fields }),
      Some(other) => Err(de::Error::invalid_type(unexpected(other), &"a string filename")),
      None => Err(de::Error::missing_field("file")),
    }
  }
}

fn unexpected(value: &Value) -> de::Unexpected<'_> {
  match value {
    Value::Null => de::Unexpected::Unit,
    Value::Bool(b) => de::Unexpected::Bool(*b),
    Value::Number(_) => de::Unexpected::Other("number"),
    Value::String(s) => de::Unexpected::Str(s),
    Value::Array(_) => de::Unexpected::Seq,
    Value::Object(_) => de::Unexpected::Map,
  }
}

impl PhotoRecord {
  /// Build a fresh record for `path` from a categorization.
  ///
  /// `id` is the file stem and `file` the base filename.
  pub fn from_categorization(path: &Path, categorization: Categorization) -> Self {
    let mut fields = Map::new();
    fields.insert("id".to_string(), Value::String(file_stem(path)));
    fields.insert("file".to_string(), Value::String(file_name(path)));
    fields.insert("category".to_string(), Value::String(categorization.category.to_string()));
    fields.insert("title".to_string(), Value::String(categorization.title));
    fields.insert("description".to_string(), Value::String(categorization.description));
    Self { fields }
  }

  pub fn file(&self) -> &str {
    self.str_field("file").unwrap_or_default()
  }

  pub fn id(&self) -> Option<&str> {
    self.str_field("id")
  }

  pub fn title(&self) -> Option<&str> {
    self.str_field("title")
  }

  pub fn description(&self) -> Option<&str> {
    self.str_field("description")
  }

  /// `None` when the entry has no category or one outside the known set
  pub fn category(&self) -> Option<Category> {
    self.str_field("category").and_then(|c| c.parse().ok())
  }

  pub fn get(&self, key: &str) -> Option<&Value> {
    self.fields.get(key)
  }

  fn str_field(&self, key: &str) -> Option<&str> {
    self.fields.get(key).and_then(Value::as_str)
  }
}

pub fn file_name(path: &Path) -> String {
  path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
}

pub fn file_stem(path: &Path) -> String {
  path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default()
}
