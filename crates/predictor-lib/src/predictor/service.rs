//! Prediction service: validate, render, dispatch, parse

use super::prompt::{output_schema, render_prompt};
use super::validation::{validate, ValidationError};
use crate::model::{GenerativeModel, ModelError};
use crate::models::{PredictionRequest, PredictionResult};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Error)]
pub enum PredictionError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    ModelInvocation(#[from] ModelError),
}

/// Stateless failure-prediction pipeline over a generative model
#[derive(Clone)]
pub struct PredictionService {
    model: Arc<dyn GenerativeModel>,
    schema: Arc<Value>,
}

impl PredictionService {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self {
            model,
            schema: Arc::new(output_schema()),
        }
    }

    /// Name of the underlying model
    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Predict equipment failure from sensor readings.
    ///
    /// Validation runs before the model is called. A single model call is
    /// made; its conformant output is returned unchanged.
    pub async fn predict(&self, request: PredictionRequest) -> Result<PredictionResult, PredictionError> {
        let validated = validate(request)?;
        let prompt = render_prompt(&validated);

        debug!(
            equipment_type = %validated.equipment_type(),
            model = %self.model.name(),
            "Dispatching prediction request"
        );

        let output = self
            .model
            .generate(&prompt, &self.schema)
            .await?
            .ok_or(ModelError::EmptyOutput)?;

        Ok(parse_output(output)?)
    }
}

/// Map the model's structured output onto a PredictionResult
fn parse_output(output: Value) -> Result<PredictionResult, ModelError> {
    let result: PredictionResult =
        serde_json::from_value(output).map_err(|e| ModelError::NonConformant(e.to_string()))?;

    if !result.has_valid_confidence() {
        return Err(ModelError::NonConformant(format!(
            "confidenceLevel {} outside [0, 1]",
            result.confidence_level
        )));
    }

    Ok(result)
}
