//! Generative model boundary
//!
//! The prediction pipeline only sees [`GenerativeModel`]: a rendered prompt
//! and a target output schema go in, a structured JSON value (or nothing)
//! comes out. Schema conformance of that value is the provider's job.

mod client;

pub use client::{extract_json, ModelClient, ModelClientConfig, DEFAULT_ENDPOINT, DEFAULT_MODEL};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Failure at the model-call boundary
#[derive(Debug, Clone, Error)]
pub enum ModelError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("timeout")]
    Timeout,
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },
    #[error("rate limited")]
    RateLimited,
    #[error("invalid api key")]
    InvalidApiKey,
    #[error("missing api key: ANTHROPIC_API_KEY environment variable not set")]
    MissingApiKey,
    #[error("invalid model endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("json error: {0}")]
    Serde(String),
    #[error("model returned no output")]
    EmptyOutput,
    #[error("model output does not match schema: {0}")]
    NonConformant(String),
}

/// Trait for structured-generation backends
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Run the prompt and return the model's structured output.
    ///
    /// `Ok(None)` means the model answered with nothing usable.
    async fn generate(&self, prompt: &str, schema: &Value) -> Result<Option<Value>, ModelError>;

    /// Model identifier, used for logs and metrics
    fn name(&self) -> &str;
}
