//! LLM backend abstraction and implementations
//!
//! Supports Anthropic, OpenAI, and a local Ollama daemon. Each backend
//! implements the TestGenerator trait, isolating its request/response quirks
//! behind one method so the rest of the pipeline stays backend-agnostic.

pub mod anthropic;
pub mod ollama;
pub mod openai;

use crate::error::{Error, LlmError, Result};
use crate::settings::Settings;
use colored::Colorize;
use std::fmt;
use std::str::FromStr;

/// Common trait for test-generating backends
#[async_trait::async_trait]
pub trait TestGenerator: Send + Sync {
    /// Send a prompt to the backend and return the generated test code
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Get the backend name (e.g., "anthropic", "ollama")
    fn name(&self) -> &str;
}

/// Closed set of supported model identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ModelId {
    /// Anthropic Claude Sonnet
    Sonnet,
    /// OpenAI GPT-4o
    Gpt4o,
    /// Local Ollama daemon
    Ollama,
}

impl ModelId {
    /// Construct the backend adapter for this identifier.
    ///
    /// Each identifier maps to exactly one adapter. Credentials come from the
    /// supplied settings; `local_model` names the Ollama model to use and is
    /// ignored by the remote backends.
    pub fn generator(
        &self,
        settings: &Settings,
        local_model: &str,
    ) -> Result<Box<dyn TestGenerator>> {
        println!("{}", format!("Initializing {} generator...", self).cyan());
        match self {
            ModelId::Sonnet => Ok(Box::new(anthropic::AnthropicGenerator::new(
                &settings.anthropic_api_key,
            ))),
            ModelId::Gpt4o => Ok(Box::new(openai::OpenAiGenerator::new(
                &settings.openai_api_key,
                &settings.openai_org_id,
            ))),
            ModelId::Ollama => Ok(Box::new(ollama::OllamaGenerator::new(local_model))),
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelId::Sonnet => "sonnet",
            ModelId::Gpt4o => "gpt4o",
            ModelId::Ollama => "ollama",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ModelId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sonnet" => Ok(ModelId::Sonnet),
            "gpt4o" => Ok(ModelId::Gpt4o),
            "ollama" => Ok(ModelId::Ollama),
            other => Err(Error::Llm(LlmError::UnsupportedModel(other.to_string()))),
        }
    }
}
