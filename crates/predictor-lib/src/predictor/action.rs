//! Server-side prediction action
//!
//! Wraps [`PredictionService`] for the presentation layer: validation
//! errors are reported, model failures become a degraded result.

use super::service::{PredictionError, PredictionService};
use super::validation::ValidationError;
use crate::health::{components, HealthRegistry};
use crate::models::{PredictionRequest, PredictionResult};
use crate::observability::{PredictorMetrics, StructuredLogger};
use std::time::Instant;

#[derive(Clone)]
pub struct PredictionAction {
    service: PredictionService,
    health: HealthRegistry,
    metrics: PredictorMetrics,
    logger: StructuredLogger,
}

impl PredictionAction {
    pub fn new(
        service: PredictionService,
        health: HealthRegistry,
        metrics: PredictorMetrics,
        logger: StructuredLogger,
    ) -> Self {
        Self {
            service,
            health,
            metrics,
            logger,
        }
    }

    pub fn service(&self) -> &PredictionService {
        &self.service
    }

    /// Run a prediction for the presentation layer.
    ///
    /// Never returns a model error: any model failure is logged and
    /// replaced by [`PredictionResult::degraded`].
    pub async fn get_prediction(
        &self,
        request: PredictionRequest,
    ) -> Result<PredictionResult, ValidationError> {
        let equipment_type = request.equipment_type.clone();
        let start = Instant::now();

        match self.service.predict(request).await {
            Ok(result) => {
                let elapsed = start.elapsed();
                self.metrics.observe_prediction_latency(elapsed.as_secs_f64());
                self.metrics.inc_predictions(result.predicted_failure);
                self.health.set_healthy(components::MODEL_CLIENT).await;
                self.logger.log_prediction(
                    &equipment_type,
                    result.predicted_failure,
                    result.confidence_level,
                    result.follows_no_failure_policy(),
                    elapsed.as_millis(),
                );
                Ok(result)
            }
            Err(PredictionError::Validation(e)) => {
                self.metrics.inc_validation_errors();
                self.logger.log_rejected(e.field.as_str(), &e.to_string());
                Err(e)
            }
            Err(PredictionError::ModelInvocation(e)) => {
                let message = e.to_string();
                self.metrics.observe_prediction_latency(start.elapsed().as_secs_f64());
                self.metrics.inc_prediction_errors();
                self.health
                    .set_degraded(components::MODEL_CLIENT, message.clone())
                    .await;
                self.logger
                    .log_prediction_failure(&equipment_type, self.service.model_name(), &message);
                Ok(PredictionResult::degraded(message))
            }
        }
    }
}
