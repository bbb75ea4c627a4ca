//! Health check infrastructure for the prediction server
//!
//! The model backend can degrade without taking the server down, so
//! component health and readiness are reported separately.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Health status of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Healthy,
    /// Still answering, but with degraded results
    Degraded,
    Unhealthy,
}

impl ComponentStatus {
    fn severity(self) -> u8 {
        match self {
            ComponentStatus::Healthy => 0,
            ComponentStatus::Degraded => 1,
            ComponentStatus::Unhealthy => 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub status: ComponentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub last_check_timestamp: i64,
}

impl ComponentHealth {
    fn with_status(status: ComponentStatus, message: Option<String>) -> Self {
        Self {
            status,
            message,
            last_check_timestamp: chrono::Utc::now().timestamp(),
        }
    }

    pub fn healthy() -> Self {
        Self::with_status(ComponentStatus::Healthy, None)
    }

    pub fn degraded(message: impl Into<String>) -> Self {
        Self::with_status(ComponentStatus::Degraded, Some(message.into()))
    }

    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self::with_status(ComponentStatus::Unhealthy, Some(message.into()))
    }
}

/// Body of `/healthz`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: ComponentStatus,
    pub components: HashMap<String, ComponentHealth>,
}

impl HealthResponse {
    /// Worst status across all components
    pub fn compute_status(components: &HashMap<String, ComponentHealth>) -> ComponentStatus {
        components
            .values()
            .map(|health| health.status)
            .max_by_key(|status| status.severity())
            .unwrap_or(ComponentStatus::Healthy)
    }
}

/// Body of `/readyz`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

pub mod components {
    pub const PREDICTION_SERVICE: &str = "prediction_service";
    pub const MODEL_CLIENT: &str = "model_client";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Starting,
    Serving,
    Draining,
}

#[derive(Debug)]
struct RegistryState {
    components: HashMap<String, ComponentHealth>,
    phase: Phase,
}

/// Shared view of component health and server lifecycle.
///
/// Starts out not ready; [`HealthRegistry::mark_serving`] opens it to
/// traffic and [`HealthRegistry::begin_drain`] closes it again on shutdown.
#[derive(Debug, Clone)]
pub struct HealthRegistry {
    state: Arc<RwLock<RegistryState>>,
}

impl Default for HealthRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthRegistry {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(RegistryState {
                components: HashMap::new(),
                phase: Phase::Starting,
            })),
        }
    }

    /// Track `name`, starting healthy
    pub async fn register(&self, name: &str) {
        self.record(name, ComponentHealth::healthy()).await;
    }

    async fn record(&self, name: &str, health: ComponentHealth) {
        self.state
            .write()
            .await
            .components
            .insert(name.to_string(), health);
    }

    pub async fn set_healthy(&self, name: &str) {
        self.record(name, ComponentHealth::healthy()).await;
    }

    pub async fn set_degraded(&self, name: &str, message: impl Into<String>) {
        self.record(name, ComponentHealth::degraded(message)).await;
    }

    /// Startup finished; readiness now follows component health
    pub async fn mark_serving(&self) {
        self.state.write().await.phase = Phase::Serving;
    }

    /// Stop taking traffic. The prediction service reports unhealthy with
    /// `reason` and readiness fails until the process exits.
    pub async fn begin_drain(&self, reason: impl Into<String>) {
        let mut state = self.state.write().await;
        state.phase = Phase::Draining;
        state.components.insert(
            components::PREDICTION_SERVICE.to_string(),
            ComponentHealth::unhealthy(reason),
        );
    }

    pub async fn health(&self) -> HealthResponse {
        let components = self.state.read().await.components.clone();
        let status = HealthResponse::compute_status(&components);
        HealthResponse { status, components }
    }

    pub async fn readiness(&self) -> ReadinessResponse {
        let state = self.state.read().await;
        let reason = match state.phase {
            Phase::Starting => Some("Server not yet initialized"),
            Phase::Draining => Some("Shutting down"),
            Phase::Serving
                if HealthResponse::compute_status(&state.components)
                    == ComponentStatus::Unhealthy =>
            {
                Some("Critical component unhealthy")
            }
            Phase::Serving => None,
        };

        ReadinessResponse {
            ready: reason.is_none(),
            reason: reason.map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_registry_initial_state() {
        let registry = HealthRegistry::new();
        let health = registry.health().await;

        assert_eq!(health.status, ComponentStatus::Healthy);
        assert!(health.components.is_empty());
    }

    #[tokio::test]
    async fn test_health_registry_component_registration() {
        let registry = HealthRegistry::new();
        registry.register(components::MODEL_CLIENT).await;

        let health = registry.health().await;
        assert_eq!(
            health.components[components::MODEL_CLIENT].status,
            ComponentStatus::Healthy
        );
    }

    #[tokio::test]
    async fn test_degraded_model_degrades_overall_status() {
        let registry = HealthRegistry::new();
        registry.register(components::MODEL_CLIENT).await;
        registry.register(components::PREDICTION_SERVICE).await;

        registry.set_degraded(components::MODEL_CLIENT, "Rate limited").await;

        let health = registry.health().await;
        assert_eq!(health.status, ComponentStatus::Degraded);
        assert_eq!(
            health.components[components::MODEL_CLIENT].message.as_deref(),
            Some("Rate limited")
        );
    }

    #[test]
    fn test_compute_status_takes_worst() {
        let components = HashMap::from([
            ("a".to_string(), ComponentHealth::degraded("slow")),
            ("b".to_string(), ComponentHealth::unhealthy("down")),
            ("c".to_string(), ComponentHealth::healthy()),
        ]);
        assert_eq!(HealthResponse::compute_status(&components), ComponentStatus::Unhealthy);
    }

    #[tokio::test]
    async fn test_readiness_not_ready_while_starting() {
        let registry = HealthRegistry::new();
        let readiness = registry.readiness().await;

        assert!(!readiness.ready);
        assert_eq!(readiness.reason.as_deref(), Some("Server not yet initialized"));
    }

    #[tokio::test]
    async fn test_readiness_ready_once_serving() {
        let registry = HealthRegistry::new();
        registry.register(components::MODEL_CLIENT).await;
        registry.mark_serving().await;

        let readiness = registry.readiness().await;
        assert!(readiness.ready);
        assert!(readiness.reason.is_none());
    }

    #[tokio::test]
    async fn test_drain_fails_readiness_and_health() {
        let registry = HealthRegistry::new();
        registry.register(components::PREDICTION_SERVICE).await;
        registry.mark_serving().await;

        registry.begin_drain("SIGINT received").await;

        let readiness = registry.readiness().await;
        assert!(!readiness.ready);
        assert_eq!(readiness.reason.as_deref(), Some("Shutting down"));

        let health = registry.health().await;
        assert_eq!(health.status, ComponentStatus::Unhealthy);
        assert_eq!(
            health.components[components::PREDICTION_SERVICE].message.as_deref(),
            Some("SIGINT received")
        );
    }

    #[tokio::test]
    async fn test_recovery_after_degradation() {
        let registry = HealthRegistry::new();
        registry.register(components::MODEL_CLIENT).await;
        registry.mark_serving().await;

        registry.set_degraded(components::MODEL_CLIENT, "Rate limited").await;
        assert!(registry.readiness().await.ready);
        assert_eq!(registry.health().await.status, ComponentStatus::Degraded);

        registry.set_healthy(components::MODEL_CLIENT).await;
        let health = registry.health().await;
        assert_eq!(health.status, ComponentStatus::Healthy);
        assert!(health.components[components::MODEL_CLIENT].message.is_none());
    }
}
