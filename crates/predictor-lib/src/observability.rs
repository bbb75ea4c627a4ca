//! Observability infrastructure for the prediction service
//!
//! Provides:
//! - Prometheus metrics (prediction latency, outcomes, model info)
//! - Structured JSON logging with tracing

use prometheus::{
    register_gauge_vec, register_histogram, register_int_counter, GaugeVec, Histogram, IntCounter,
};
use std::sync::OnceLock;
use tracing::{error, info, warn};

/// Histogram buckets for model round-trip latency (in seconds)
const LATENCY_BUCKETS: &[f64] = &[0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<PredictorMetricsInner> = OnceLock::new();

struct PredictorMetricsInner {
    prediction_latency_seconds: Histogram,
    predictions_total: IntCounter,
    predicted_failures_total: IntCounter,
    prediction_errors_total: IntCounter,
    validation_errors_total: IntCounter,
    model_info: GaugeVec,
}

impl PredictorMetricsInner {
    fn new() -> Self {
        Self {
            prediction_latency_seconds: register_histogram!(
                "efp_prediction_latency_seconds",
                "Time spent waiting for the generative model",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register prediction_latency_seconds"),

            predictions_total: register_int_counter!(
                "efp_predictions_total",
                "Total number of successful predictions"
            )
            .expect("Failed to register predictions_total"),

            predicted_failures_total: register_int_counter!(
                "efp_predicted_failures_total",
                "Total number of predictions that forecast an equipment failure"
            )
            .expect("Failed to register predicted_failures_total"),

            prediction_errors_total: register_int_counter!(
                "efp_prediction_errors_total",
                "Total number of model invocations that produced a degraded result"
            )
            .expect("Failed to register prediction_errors_total"),

            validation_errors_total: register_int_counter!(
                "efp_validation_errors_total",
                "Total number of requests rejected before dispatch"
            )
            .expect("Failed to register validation_errors_total"),

            model_info: register_gauge_vec!(
                "efp_model_info",
                "Information about the configured generative model",
                &["model"]
            )
            .expect("Failed to register model_info"),
        }
    }
}

/// Prediction metrics for Prometheus exposition
///
/// Lightweight handle to the global metrics instance; clones share it.
#[derive(Clone)]
pub struct PredictorMetrics {
    _private: (),
}

impl Default for PredictorMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictorMetrics {
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(PredictorMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &PredictorMetricsInner {
        GLOBAL_METRICS.get().expect("Metrics not initialized")
    }

    pub fn observe_prediction_latency(&self, duration_secs: f64) {
        self.inner().prediction_latency_seconds.observe(duration_secs);
    }

    /// Count a successful prediction
    pub fn inc_predictions(&self, predicted_failure: bool) {
        self.inner().predictions_total.inc();
        if predicted_failure {
            self.inner().predicted_failures_total.inc();
        }
    }

    pub fn inc_prediction_errors(&self) {
        self.inner().prediction_errors_total.inc();
    }

    pub fn inc_validation_errors(&self) {
        self.inner().validation_errors_total.inc();
    }

    pub fn set_model(&self, model: &str) {
        self.inner().model_info.reset();
        self.inner().model_info.with_label_values(&[model]).set(1.0);
    }
}

/// Structured logger for prediction events
#[derive(Clone)]
pub struct StructuredLogger {
    service_name: String,
}

impl StructuredLogger {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }

    pub fn log_prediction(
        &self,
        equipment_type: &str,
        predicted_failure: bool,
        confidence_level: f64,
        follows_policy: bool,
        latency_ms: u128,
    ) {
        if follows_policy {
            info!(
                event = "prediction_generated",
                service = %self.service_name,
                equipment_type = %equipment_type,
                predicted_failure = predicted_failure,
                confidence_level = confidence_level,
                latency_ms = latency_ms,
                "Generated failure prediction"
            );
        } else {
            warn!(
                event = "prediction_generated",
                service = %self.service_name,
                equipment_type = %equipment_type,
                predicted_failure = predicted_failure,
                confidence_level = confidence_level,
                latency_ms = latency_ms,
                "Generated failure prediction outside the no-failure convention"
            );
        }
    }

    /// Log a model failure that was replaced by a degraded result
    pub fn log_prediction_failure(&self, equipment_type: &str, model: &str, error: &str) {
        error!(
            event = "prediction_failed",
            service = %self.service_name,
            equipment_type = %equipment_type,
            model = %model,
            error = %error,
            "Prediction failed, returning degraded result"
        );
    }

    pub fn log_rejected(&self, field: &str, reason: &str) {
        info!(
            event = "prediction_rejected",
            service = %self.service_name,
            field = %field,
            reason = %reason,
            "Prediction request rejected"
        );
    }

    pub fn log_startup(&self, version: &str, model: &str, api_key_configured: bool) {
        info!(
            event = "server_started",
            service = %self.service_name,
            version = %version,
            model = %model,
            api_key_configured = api_key_configured,
            "Prediction server started"
        );
    }

    pub fn log_shutdown(&self, reason: &str) {
        info!(
            event = "server_shutdown",
            service = %self.service_name,
            reason = %reason,
            "Prediction server shutting down"
        );
    }
}
