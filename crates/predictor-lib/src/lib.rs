//! Equipment failure prediction library
//!
//! This crate provides:
//! - Request validation and the predictive-maintenance prompt template
//! - A structured-generation boundary and an HTTP model client
//! - The prediction service and its degraded-result action
//! - Health checks and observability

pub mod health;
pub mod model;
pub mod models;
pub mod observability;
pub mod predictor;

pub use health::{
    ComponentHealth, ComponentStatus, HealthRegistry, HealthResponse, ReadinessResponse,
};
pub use model::{GenerativeModel, ModelClient, ModelClientConfig, ModelError};
pub use models::*;
pub use observability::{PredictorMetrics, StructuredLogger};
pub use predictor::{
    PredictionAction, PredictionError, PredictionService, RequiredField, ValidationError,
};
