//! Local Ollama daemon backend
//!
//! Unlike the remote backends, an absent daemon fails silently and
//! confusingly if probed with a generate call, so this adapter checks
//! daemon liveness first with a short-timeout version request and fails
//! fast with a descriptive error before attempting generation.

use crate::error::{Error, LlmError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::debug;

const DEFAULT_HOST: &str = "http://localhost:11434";

/// Default model when none is configured
pub const DEFAULT_MODEL: &str = "codestral";

const LIVENESS_TIMEOUT_SECS: u64 = 2;
const GENERATE_TIMEOUT_SECS: u64 = 300;

/// Local Ollama backend adapter
pub struct OllamaGenerator {
    client: reqwest::Client,
    host: String,
    model: String,
}

impl OllamaGenerator {
    /// Create a new adapter for the given model name.
    ///
    /// The daemon host comes from `OLLAMA_HOST` when set, otherwise
    /// `http://localhost:11434`.
    pub fn new(model: &str) -> Self {
        let host = env::var("OLLAMA_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        Self::with_host(model, host)
    }

    /// Create a new adapter pointed at an explicit host.
    pub fn with_host(model: &str, host: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(GENERATE_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            host: host.into().trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    /// Verify the daemon is running before sending any generate request.
    async fn check_available(&self) -> Result<()> {
        let url = format!("{}/api/version", self.host);
        self.client
            .get(&url)
            .timeout(Duration::from_secs(LIVENESS_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|e| {
                Error::Llm(LlmError::BackendUnavailable {
                    backend: "ollama".to_string(),
                    details: format!(
                        "daemon not reachable at {} ({}). Is `ollama serve` running?",
                        self.host, e
                    ),
                })
            })?;
        Ok(())
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[async_trait::async_trait]
impl crate::llm::TestGenerator for OllamaGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.check_available().await?;

        debug!("Sending {} chars to ollama model {}", prompt.len(), self.model);

        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.host))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                Error::Llm(LlmError::RequestFailed {
                    backend: "ollama".to_string(),
                    source: e.to_string(),
                })
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Llm(LlmError::RequestFailed {
                backend: "ollama".to_string(),
                source: format!("HTTP {}: {}", status.as_u16(), body),
            }));
        }

        let parsed: GenerateResponse = response.json().await.map_err(|e| {
            Error::Llm(LlmError::InvalidResponse {
                backend: "ollama".to_string(),
                details: e.to_string(),
            })
        })?;

        Ok(parsed.response)
    }

    fn name(&self) -> &str {
        "ollama"
    }
}
