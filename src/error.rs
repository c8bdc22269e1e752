// SPDX-License-Identifier: MIT

//! Typed error handling for outreach-rs

use thiserror::Error;

pub type Result<T> = std::result::Result<T, OutreachError>;

/// Top-level error type for outreach-rs
#[derive(Debug, Error)]
pub enum OutreachError {
    /// API errors from external services (OpenAI, Tavily, Gmail, etc.)
    #[error("API error from {provider}: {message}")]
    Api { provider: String, message: String },

    /// Enrichment or search lookup failed or came back unusable
    #[error("Lookup failure from {source_name}: {message}")]
    Lookup {
        source_name: String,
        message: String,
    },

    /// A drafting call errored or returned an empty draft
    #[error("Generation failure in {node}: {message}")]
    Generation { node: String, message: String },

    /// Configuration errors (missing env vars, invalid config file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Lead input that does not parse as email or "name - company"
    #[error("Invalid lead input: {0}")]
    Input(String),

    /// An external call exceeded its per-call deadline
    #[error("{operation} timed out after {secs}s")]
    Timeout { operation: String, secs: u64 },

    /// HTTP request errors
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic error wrapper for compatibility
    #[error("{0}")]
    Other(String),
}

impl OutreachError {
    /// Create an API error
    pub fn api(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a lookup error
    pub fn lookup(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Lookup {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Create a generation error
    pub fn generation(node: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Generation {
            node: node.into(),
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create from a generic error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

impl From<&str> for OutreachError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

impl From<String> for OutreachError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}
