//! Anthropic Messages API backend
//!
//! Sends the prompt as a single user message and extracts the first
//! text-typed content block from the response. HTTP status codes are mapped
//! onto the shared error taxonomy so the caller can tell an auth problem
//! from a malformed exchange.

use crate::error::{Error, LlmError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const MODEL: &str = "claude-3-5-sonnet-20240620";
const MAX_TOKENS: u32 = 4096;
const TIMEOUT_SECS: u64 = 120;

/// Anthropic backend adapter
pub struct AnthropicGenerator {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl AnthropicGenerator {
    /// Create a new adapter with the given API key.
    pub fn new(api_key: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            api_key: api_key.to_string(),
            base_url: API_URL.to_string(),
        }
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

/// Pull the first text block out of a response, trimmed.
fn extract_text(response: MessagesResponse) -> Result<String> {
    for block in response.content {
        if block.kind == "text" {
            return Ok(block.text.trim().to_string());
        }
    }
    Err(Error::Llm(LlmError::CodeNotFound("anthropic".to_string())))
}

/// Map a non-success HTTP status onto an error.
fn classify_status(status: u16, body: &str) -> Error {
    match status {
        401 | 403 => Error::Llm(LlmError::AuthenticationFailed("anthropic".to_string())),
        429 => Error::Llm(LlmError::RateLimited {
            backend: "anthropic".to_string(),
            retry_after: None,
        }),
        _ => Error::Llm(LlmError::RequestFailed {
            backend: "anthropic".to_string(),
            source: format!("HTTP {}: {}", status, body),
        }),
    }
}

#[async_trait::async_trait]
impl crate::llm::TestGenerator for AnthropicGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = MessagesRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        debug!("Sending {} chars to anthropic", prompt.len());

        let response = self
            .client
            .post(&self.base_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                Error::Llm(LlmError::RequestFailed {
                    backend: "anthropic".to_string(),
                    source: e.to_string(),
                })
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status.as_u16(), &body));
        }

        let parsed: MessagesResponse = response.json().await.map_err(|e| {
            Error::Llm(LlmError::InvalidResponse {
                backend: "anthropic".to_string(),
                details: e.to_string(),
            })
        })?;

        extract_text(parsed)
    }

    fn name(&self) -> &str {
        "anthropic"
    }
}
