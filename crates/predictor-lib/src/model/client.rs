//! HTTP client for the Anthropic Messages API

use super::{GenerativeModel, ModelError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MESSAGES_PATH: &str = "v1/messages";

/// Configuration for the model client
#[derive(Debug, Clone)]
pub struct ModelClientConfig {
    /// Base URL of the API (e.g., "https://api.anthropic.com")
    pub endpoint: String,
    /// API key; requests fail with `MissingApiKey` when absent
    pub api_key: Option<String>,
    /// Model identifier
    pub model: String,
    /// Maximum tokens the model may produce
    pub max_tokens: u32,
}

impl Default for ModelClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 1024,
        }
    }
}

impl ModelClientConfig {
    /// Default configuration with the key taken from ANTHROPIC_API_KEY
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("ANTHROPIC_API_KEY").ok(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: String,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

impl MessagesResponse {
    fn text(&self) -> Option<&str> {
        self.content.iter().find_map(|block| match block {
            ContentBlock::Text { text } => Some(text.as_str()),
            ContentBlock::Other => None,
        })
    }
}

/// `{endpoint}/v1/messages`, keeping any path prefix on the endpoint
fn messages_url(endpoint: &str) -> Result<Url, url::ParseError> {
    let mut base = Url::parse(endpoint)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(MESSAGES_PATH)
}

/// Generative model backed by the Anthropic Messages API.
///
/// One attempt per call and no client-side timeout.
#[derive(Debug, Clone)]
pub struct ModelClient {
    http: Client,
    url: Url,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
}

impl ModelClient {
    pub fn new(config: ModelClientConfig) -> Result<Self, ModelError> {
        let url = messages_url(&config.endpoint)
            .map_err(|e| ModelError::InvalidEndpoint(format!("{}: {}", config.endpoint, e)))?;

        let http = Client::builder()
            .user_agent(concat!("equipment-failure-predictor/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ModelError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            url,
            api_key: config.api_key,
            model: config.model,
            max_tokens: config.max_tokens,
        })
    }

    /// Whether an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    async fn send(&self, prompt: &str, schema: &Value) -> Result<String, ModelError> {
        let api_key = self.api_key.as_deref().ok_or(ModelError::MissingApiKey)?;

        let request = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system: system_prompt(schema),
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };

        let res = self
            .http
            .post(self.url.clone())
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        match res.status() {
            s if s.is_success() => {
                let body = res
                    .json::<MessagesResponse>()
                    .await
                    .map_err(|e| ModelError::Serde(e.to_string()))?;
                Ok(body.text().unwrap_or_default().to_string())
            }
            StatusCode::UNAUTHORIZED => Err(ModelError::InvalidApiKey),
            StatusCode::TOO_MANY_REQUESTS => Err(ModelError::RateLimited),
            s => {
                let status = s.as_u16();
                let body = res.text().await.unwrap_or_default();
                Err(ModelError::Http { status, body })
            }
        }
    }
}

#[async_trait]
impl GenerativeModel for ModelClient {
    async fn generate(&self, prompt: &str, schema: &Value) -> Result<Option<Value>, ModelError> {
        let text = self.send(prompt, schema).await?;

        if text.trim().is_empty() {
            debug!(model = %self.model, "Model returned an empty response");
            return Ok(None);
        }

        let json_str = extract_json(&text);
        let value: Value = serde_json::from_str(json_str).map_err(|e| {
            error!(
                json_error = %e,
                response_length = text.len(),
                extracted_json_preview = %json_str.chars().take(500).collect::<String>(),
                "Failed to parse JSON response from model"
            );
            ModelError::Serde(e.to_string())
        })?;

        Ok(match value {
            Value::Null => None,
            v => Some(v),
        })
    }

    fn name(&self) -> &str {
        &self.model
    }
}

fn system_prompt(schema: &Value) -> String {
    format!(
        "Respond with a single JSON object and nothing else. \
         The object must conform to this JSON Schema:\n{}",
        schema
    )
}

fn map_reqwest_error(e: reqwest::Error) -> ModelError {
    if e.is_timeout() {
        ModelError::Timeout
    } else {
        ModelError::Transport(e.to_string())
    }
}

/// Extract JSON from text that may wrap it in a markdown code block
pub fn extract_json(text: &str) -> &str {
    let text = text.trim();

    if let Some(start) = text.find("```json") {
        let content_start = start + 7;
        if let Some(end) = text[content_start..].find("```") {
            return text[content_start..content_start + end].trim();
        }
    }

    if let Some(start) = text.find("```") {
        let content_start = start + 3;
        // Skip a language tag on the opening fence line
        let content_start = text[content_start..]
            .find('\n')
            .map(|i| content_start + i + 1)
            .unwrap_or(content_start);
        if let Some(end) = text[content_start..].find("```") {
            return text[content_start..content_start + end].trim();
        }
    }

    text
}
