//! Groq chat completions client
//!
//! Talks to Groq's OpenAI-compatible chat completions endpoint running
//! Llama 3.3 70B. One blocking-style call per pipeline stage; no
//! streaming, no tool calling.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Errors from the provider seam. Transport and API failures propagate
/// up through the pipeline; callers decide whether a malformed body is
/// recoverable.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed response: {reason}. Body preview: {preview}")]
    Malformed { reason: String, preview: String },
}

/// Request to the chat completions API
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

/// A single chat message
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

/// Response from the chat completions API
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

/// Groq API client
pub struct GroqClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GroqClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run a single completion and return the assistant text.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, ProviderError> {
        self.send(self.build_request(system, user, None)).await
    }

    /// Run a completion constrained to a JSON object body.
    pub async fn complete_json(&self, system: &str, user: &str) -> Result<String, ProviderError> {
        let format = ResponseFormat {
            format_type: "json_object".into(),
        };
        self.send(self.build_request(system, user, Some(format))).await
    }

    fn build_request(
        &self,
        system: &str,
        user: &str,
        response_format: Option<ResponseFormat>,
    ) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            temperature: 0.7,
            max_tokens: 1024,
            response_format,
        }
    }

    async fn send(&self, request: ChatRequest) -> Result<String, ProviderError> {
        let response = self
            .http
            .post(API_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api { status, body });
        }

        let text = response.text().await?;

        let parsed: ChatResponse = serde_json::from_str(&text).map_err(|e| {
            ProviderError::Malformed {
                reason: e.to_string(),
                preview: preview(&text),
            }
        })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ProviderError::Malformed {
                reason: "no choices in response".into(),
                preview: preview(&text),
            })?;

        Ok(content.trim().to_string())
    }
}

fn preview(text: &str) -> String {
    let mut end = text.len().min(500);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].to_string()
}
