//! HTTP client for the Amazon Nova chat-completions API
//!
//! Nova speaks the OpenAI-compatible `/chat/completions` dialect. One
//! request carries the prompt and one image as a `data:` URL.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::categorizer::VisionModel;
use crate::config::ModelConfig;
use crate::{AnselError, Result};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
  model: &'a str,
  temperature: f32,
  messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
  role: &'static str,
  content: Vec<ContentPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
  Text { text: &'a str },
  ImageUrl { image_url: ImageUrl<'a> },
}

#[derive(Debug, Serialize)]
struct ImageUrl<'a> {
  url: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
  choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
  message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
  #[serde(default)]
  content: Option<String>,
}

pub struct NovaClient {
  client: Client,
  config: ModelConfig,
}

impl NovaClient {
  pub fn new(config: ModelConfig) -> Self {
    Self { client: Client::new(), config }
  }
}

#[async_trait]
impl VisionModel for NovaClient {
  async fn complete(&self, prompt: &str, image_url: &str) -> Result<String> {
    let api_key = self.config.api_key.as_deref().ok_or(AnselError::MissingApiKey)?;

    let request = ChatRequest {
      model: &self.config.model,
      temperature: self.config.temperature,
      messages: vec![ChatMessage {
        role: "user",
        content: vec![
          ContentPart::Text { text: prompt },
          ContentPart::ImageUrl { image_url: ImageUrl { url: image_url } },
        ],
      }],
    };

    let url = self.config.completions_url();
    tracing::debug!(%url, model = %self.config.model, "sending chat completion request");

    let response = self.client.post(&url).bearer_auth(api_key).json(&request).send().await?;

    if !response.status().is_success() {
      let status = response.status();
      let error_text = response.text().await.unwrap_or_default();
      return Err(AnselError::model_request(format!("{status}: {error_text}")));
    }

    let result: ChatResponse = response.json().await?;
    let choice = result
      .choices
      .into_iter()
      .next()
      .ok_or_else(|| AnselError::empty_model_response(&self.config.model))?;

    Ok(choice.message.content.unwrap_or_default())
  }
}
