//! Core data models for equipment failure prediction

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Prefix of the failure reason in every degraded result
pub const DEGRADED_REASON_PREFIX: &str = "Prediction failed: ";

/// Recommended actions attached to every degraded result
pub const DEGRADED_RECOMMENDED_ACTIONS: &str =
    "Verify input data and system logs. Contact support if the issue persists.";

/// Confidence below which a "no failure" prediction counts as low confidence
pub const LOW_CONFIDENCE_THRESHOLD: f64 = 0.5;

/// Confidence at or above which a predicted failure is treated as critical
pub const CRITICAL_CONFIDENCE_THRESHOLD: f64 = 0.8;

/// Equipment sensor readings submitted for failure analysis.
///
/// Absent or null fields deserialize as empty so that validation, not the
/// JSON layer, reports them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PredictionRequest {
    #[serde(deserialize_with = "null_as_empty")]
    pub equipment_type: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub vibration_data: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub temperature_data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub historical_maintenance_records: Option<String>,
}

impl PredictionRequest {
    pub fn new(
        equipment_type: impl Into<String>,
        vibration_data: impl Into<String>,
        temperature_data: impl Into<String>,
    ) -> Self {
        Self {
            equipment_type: equipment_type.into(),
            vibration_data: vibration_data.into(),
            temperature_data: temperature_data.into(),
            historical_maintenance_records: None,
        }
    }

    pub fn with_history(mut self, records: impl Into<String>) -> Self {
        self.historical_maintenance_records = Some(records.into());
        self
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A request whose required fields have been checked.
///
/// Only produced by [`crate::predictor::validate`]; the prompt template
/// accepts nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub(crate) equipment_type: String,
    pub(crate) vibration_data: String,
    pub(crate) temperature_data: String,
    pub(crate) historical_maintenance_records: String,
}

impl ValidatedRequest {
    pub fn equipment_type(&self) -> &str {
        &self.equipment_type
    }

    pub fn vibration_data(&self) -> &str {
        &self.vibration_data
    }

    pub fn temperature_data(&self) -> &str {
        &self.temperature_data
    }

    /// Historical records, empty when the caller supplied none
    pub fn historical_maintenance_records(&self) -> &str {
        &self.historical_maintenance_records
    }
}

/// Structured failure prediction returned by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub predicted_failure: bool,
    pub failure_reason: String,
    pub recommended_actions: String,
    pub confidence_level: f64,
}

impl PredictionResult {
    /// User-safe result substituted when the model call fails
    pub fn degraded(message: impl fmt::Display) -> Self {
        Self {
            predicted_failure: false,
            failure_reason: format!("{}{}", DEGRADED_REASON_PREFIX, message),
            recommended_actions: DEGRADED_RECOMMENDED_ACTIONS.to_string(),
            confidence_level: 0.0,
        }
    }

    /// Whether this result stands in for a failed model call
    pub fn is_degraded(&self) -> bool {
        !self.predicted_failure
            && self.confidence_level == 0.0
            && self.failure_reason.starts_with(DEGRADED_REASON_PREFIX)
            && self.recommended_actions == DEGRADED_RECOMMENDED_ACTIONS
    }

    /// Whether the confidence level lies in [0, 1]
    pub fn has_valid_confidence(&self) -> bool {
        (0.0..=1.0).contains(&self.confidence_level)
    }

    /// Check the convention the prompt asks the model to follow for
    /// "no failure" answers: empty reason and actions, low confidence.
    ///
    /// Always true when a failure is predicted.
    pub fn follows_no_failure_policy(&self) -> bool {
        if self.predicted_failure {
            return true;
        }
        self.failure_reason.is_empty()
            && self.recommended_actions.is_empty()
            && self.confidence_level < LOW_CONFIDENCE_THRESHOLD
    }

    /// Maintenance status a dashboard would show for this prediction
    pub fn suggested_status(&self) -> MaintenanceStatus {
        if !self.predicted_failure {
            MaintenanceStatus::Healthy
        } else if self.confidence_level >= CRITICAL_CONFIDENCE_THRESHOLD {
            MaintenanceStatus::Critical
        } else if self.confidence_level >= LOW_CONFIDENCE_THRESHOLD {
            MaintenanceStatus::MaintenanceRequired
        } else {
            MaintenanceStatus::NeedsCheck
        }
    }
}

/// Maintenance status of a piece of equipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaintenanceStatus {
    Healthy,
    #[serde(rename = "Needs Check")]
    NeedsCheck,
    #[serde(rename = "Maintenance Required")]
    MaintenanceRequired,
    Critical,
}

impl fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MaintenanceStatus::Healthy => "Healthy",
            MaintenanceStatus::NeedsCheck => "Needs Check",
            MaintenanceStatus::MaintenanceRequired => "Maintenance Required",
            MaintenanceStatus::Critical => "Critical",
        };
        f.write_str(label)
    }
}
