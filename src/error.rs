//! Error types for testsmith
//!
//! Covers the failure modes of the generation pipeline:
//! - LLM requests (transport failures, auth, rate limits, malformed responses)
//! - Local backend availability (Ollama daemon not reachable)
//! - File I/O (reading inputs, writing the output artifact)
//!
//! Backend failures always propagate as `Error` values. No adapter converts a
//! failure into a string returned as generated content; the pipeline caller
//! reports errors once, at the top.

use std::fmt;
use std::io;

/// Result type alias for testsmith operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for testsmith
#[derive(Debug)]
pub enum Error {
    /// LLM backend errors
    Llm(LlmError),
    /// I/O errors
    Io(IoError),
}

/// LLM backend errors
#[derive(Debug)]
pub enum LlmError {
    /// HTTP request failed (network timeout, connection refused, 5xx)
    RequestFailed { backend: String, source: String },
    /// API response malformed (invalid JSON, missing fields)
    InvalidResponse { backend: String, details: String },
    /// Well-formed response with no text content block
    CodeNotFound(String),
    /// API authentication failed (401/403, invalid or empty key)
    AuthenticationFailed(String),
    /// Rate limit exceeded (429 response)
    RateLimited { backend: String, retry_after: Option<u64> },
    /// Local backend daemon not running or not reachable
    BackendUnavailable { backend: String, details: String },
    /// Model identifier not in the supported set
    UnsupportedModel(String),
}

/// File I/O errors
#[derive(Debug)]
pub enum IoError {
    /// Failed to read file
    FileReadFailed { path: String, source: io::Error },
    /// Failed to write file
    FileWriteFailed { path: String, source: io::Error },
    /// File exists but has no content
    EmptyFile(String),
    /// Other I/O error
    Other(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Llm(e) => write!(f, "LLM error: {}", e),
            Error::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmError::RequestFailed { backend, source } => {
                write!(f, "Request to {} failed: {}", backend, source)
            }
            LlmError::InvalidResponse { backend, details } => {
                write!(f, "Invalid response from {}: {}", backend, details)
            }
            LlmError::CodeNotFound(backend) => {
                write!(f, "No code found in the {} response", backend)
            }
            LlmError::AuthenticationFailed(backend) => {
                write!(f, "Authentication failed for {}", backend)
            }
            LlmError::RateLimited { backend, retry_after } => match retry_after {
                Some(seconds) => write!(
                    f,
                    "Rate limit exceeded for {} (retry after {} seconds)",
                    backend, seconds
                ),
                None => write!(f, "Rate limit exceeded for {}", backend),
            },
            LlmError::BackendUnavailable { backend, details } => {
                write!(f, "Backend {} unavailable: {}", backend, details)
            }
            LlmError::UnsupportedModel(model) => {
                write!(f, "Unsupported model: {}", model)
            }
        }
    }
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoError::FileReadFailed { path, source } => {
                write!(f, "Failed to read {}: {}", path, source)
            }
            IoError::FileWriteFailed { path, source } => {
                write!(f, "Failed to write {}: {}", path, source)
            }
            IoError::EmptyFile(path) => {
                write!(f, "File is empty: {}", path)
            }
            IoError::Other(source) => write!(f, "{}", source),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(IoError::FileReadFailed { source, .. })
            | Error::Io(IoError::FileWriteFailed { source, .. })
            | Error::Io(IoError::Other(source)) => Some(source),
            _ => None,
        }
    }
}

impl std::error::Error for LlmError {}
impl std::error::Error for IoError {}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(IoError::Other(err))
    }
}

impl Error {
    /// Check if error is a backend availability problem (daemon down, auth)
    /// rather than a malformed exchange
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Error::Llm(LlmError::BackendUnavailable { .. })
                | Error::Llm(LlmError::AuthenticationFailed(_))
        )
    }

    /// Get formatted context string for logging
    pub fn context(&self) -> String {
        match self {
            Error::Llm(e) => format!("llm: {}", e),
            Error::Io(e) => format!("io: {}", e),
        }
    }
}
