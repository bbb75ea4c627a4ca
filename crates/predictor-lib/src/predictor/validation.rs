//! Input validation for prediction requests

use crate::models::{PredictionRequest, ValidatedRequest};
use thiserror::Error;

/// A required request field was missing or empty
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} is required", .field.label())]
pub struct ValidationError {
    pub field: RequiredField,
}

/// Fields that must be non-empty before a request is dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    EquipmentType,
    VibrationData,
    TemperatureData,
}

impl RequiredField {
    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            RequiredField::EquipmentType => "equipmentType",
            RequiredField::VibrationData => "vibrationData",
            RequiredField::TemperatureData => "temperatureData",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            RequiredField::EquipmentType => "Equipment type",
            RequiredField::VibrationData => "Vibration data",
            RequiredField::TemperatureData => "Temperature data",
        }
    }
}

fn require(value: String, field: RequiredField) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError { field })
    } else {
        Ok(value)
    }
}

/// Check the required fields and default the optional history to "".
///
/// Fields are checked in declaration order; the first empty one is reported.
pub fn validate(request: PredictionRequest) -> Result<ValidatedRequest, ValidationError> {
    Ok(ValidatedRequest {
        equipment_type: require(request.equipment_type, RequiredField::EquipmentType)?,
        vibration_data: require(request.vibration_data, RequiredField::VibrationData)?,
        temperature_data: require(request.temperature_data, RequiredField::TemperatureData)?,
        historical_maintenance_records: request.historical_maintenance_records.unwrap_or_default(),
    })
}
