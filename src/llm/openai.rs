//! OpenAI chat-completions backend
//!
//! Sends a fixed system message plus the user prompt. The API already returns
//! a single text field, so no block extraction is needed; an empty choice list
//! still counts as an invalid response.

use crate::error::{Error, LlmError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const API_URL: &str = "https://api.openai.com/v1/chat/completions";
const MODEL: &str = "gpt-4o";
const MAX_TOKENS: u32 = 4096;
const TIMEOUT_SECS: u64 = 120;
const SYSTEM_PROMPT: &str = "You are a helpful assistant that generates unit tests.";

/// OpenAI backend adapter
pub struct OpenAiGenerator {
    client: reqwest::Client,
    api_key: String,
    org_id: String,
    base_url: String,
}

impl OpenAiGenerator {
    /// Create a new adapter with the given API key and organization id.
    ///
    /// An empty organization id means the header is omitted.
    pub fn new(api_key: &str, org_id: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            api_key: api_key.to_string(),
            org_id: org_id.to_string(),
            base_url: API_URL.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
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
    content: String,
}

/// Take the first choice's message content.
fn extract_content(response: ChatResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| {
            Error::Llm(LlmError::InvalidResponse {
                backend: "openai".to_string(),
                details: "response contained no choices".to_string(),
            })
        })
}

/// Map a non-success HTTP status onto an error.
fn classify_status(status: u16, body: &str) -> Error {
    match status {
        401 | 403 => Error::Llm(LlmError::AuthenticationFailed("openai".to_string())),
        429 => Error::Llm(LlmError::RateLimited {
            backend: "openai".to_string(),
            retry_after: None,
        }),
        _ => Error::Llm(LlmError::RequestFailed {
            backend: "openai".to_string(),
            source: format!("HTTP {}: {}", status, body),
        }),
    }
}

#[async_trait::async_trait]
impl crate::llm::TestGenerator for OpenAiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        debug!("Sending {} chars to openai", prompt.len());

        let mut builder = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&request);
        if !self.org_id.is_empty() {
            builder = builder.header("OpenAI-Organization", &self.org_id);
        }

        let response = builder.send().await.map_err(|e| {
            Error::Llm(LlmError::RequestFailed {
                backend: "openai".to_string(),
                source: e.to_string(),
            })
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status.as_u16(), &body));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            Error::Llm(LlmError::InvalidResponse {
                backend: "openai".to_string(),
                details: e.to_string(),
            })
        })?;

        extract_content(parsed)
    }

    fn name(&self) -> &str {
        "openai"
    }
}
