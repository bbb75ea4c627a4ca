//! Server configuration

use anyhow::{Context, Result};
use predictor_lib::model::{ModelClientConfig, DEFAULT_ENDPOINT, DEFAULT_MODEL};
use serde::Deserialize;

/// Server configuration, read from `EFP_*` environment variables
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Port for the prediction, health and metrics endpoints
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Base URL of the generative model API
    #[serde(default = "default_model_endpoint")]
    pub model_endpoint: String,

    /// Model identifier sent with each request
    #[serde(default = "default_model_name")]
    pub model_name: String,

    /// Output token limit per prediction
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Name attached to structured log events
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

fn default_api_port() -> u16 {
    8080
}

fn default_model_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model_name() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_service_name() -> String {
    "prediction-server".to_string()
}

impl ServerConfig {
    /// Load configuration from the environment
    pub fn load() -> Result<Self> {
        let source = config::Config::builder()
            .add_source(config::Environment::with_prefix("EFP").try_parsing(true))
            .build()
            .context("Failed to read configuration")?;

        Self::from_config(source)
    }

    fn from_config(source: config::Config) -> Result<Self> {
        source
            .try_deserialize()
            .context("Invalid EFP_* configuration")
    }

    /// Model client settings; the API key comes from ANTHROPIC_API_KEY
    pub fn model_client_config(&self) -> ModelClientConfig {
        ModelClientConfig {
            endpoint: self.model_endpoint.clone(),
            model: self.model_name.clone(),
            max_tokens: self.max_tokens,
            ..ModelClientConfig::from_env()
        }
    }
}
