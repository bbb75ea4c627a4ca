//! API client for communicating with the prediction server

use anyhow::{Context, Result};
use predictor_lib::{HealthResponse, PredictionRequest, PredictionResult, ReadinessResponse};
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use url::Url;

/// API client for the prediction server
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

/// Error body returned for rejected prediction requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = Url::parse(base_url).context("Invalid API URL")?;

        Ok(Self { client, base_url })
    }

    /// Submit a prediction request
    pub async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult> {
        self.post("api/v1/predictions", request).await
    }

    /// Fetch liveness; a 503 still carries a health body
    pub async fn health(&self) -> Result<HealthResponse> {
        self.probe("healthz").await
    }

    /// Fetch readiness; a 503 still carries a readiness body
    pub async fn readiness(&self) -> Result<ReadinessResponse> {
        self.probe("readyz").await
    }

    async fn probe<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.base_url.join(path).context("Invalid path")?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        if !status.is_success() && status != StatusCode::SERVICE_UNAVAILABLE {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("API error ({}): {}", status, body);
        }

        response.json().await.context("Failed to parse response")
    }

    /// Make a POST request with JSON body
    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.base_url.join(path).context("Invalid path")?;

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(err) => anyhow::bail!("{}", err.error),
                Err(_) => anyhow::bail!("API error ({}): {}", status, body),
            }
        }

        response.json().await.context("Failed to parse response")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_predict_posts_camel_case_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1/predictions")
            .match_body(mockito::Matcher::Json(json!({
                "equipmentType": "Excavator",
                "vibrationData": "high",
                "temperatureData": "normal"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "predictedFailure": true,
                    "failureReason": "bearing wear",
                    "recommendedActions": "inspect bearings",
                    "confidenceLevel": 0.85
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let result = client
            .predict(&PredictionRequest::new("Excavator", "high", "normal"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(result.predicted_failure);
        assert_eq!(result.confidence_level, 0.85);
    }

    #[tokio::test]
    async fn test_predict_surfaces_validation_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/v1/predictions")
            .with_status(422)
            .with_body(r#"{"error":"Vibration data is required","field":"vibrationData"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let err = client
            .predict(&PredictionRequest::new("Excavator", "", "normal"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Vibration data is required");
    }

    #[tokio::test]
    async fn test_health_accepts_unavailable_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/healthz")
            .with_status(503)
            .with_body(r#"{"status":"unhealthy","components":{}}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let health = client.health().await.unwrap();

        assert_eq!(health.status, predictor_lib::ComponentStatus::Unhealthy);
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(ApiClient::new("not a url").is_err());
    }
}
