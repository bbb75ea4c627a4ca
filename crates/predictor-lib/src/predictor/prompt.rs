//! Prompt template and output schema for failure prediction

use crate::models::ValidatedRequest;
use serde_json::{json, Value};

/// Render the instruction text sent to the model
pub fn render_prompt(request: &ValidatedRequest) -> String {
    format!(
        "You are an expert in predictive maintenance for construction equipment. \
Analyze the provided sensor data and historical maintenance records to predict potential equipment failures.

Equipment Type: {equipment_type}
Vibration Data: {vibration_data}
Temperature Data: {temperature_data}
Historical Maintenance Records: {history}

Based on this information, predict whether the equipment will fail, provide a reason for the predicted failure, \
recommend actions to prevent the failure, and provide a confidence level for the prediction.

Ensure that the output is valid JSON matching the fields predictedFailure, failureReason, recommendedActions and confidenceLevel. \
If there is no failure predicted, failureReason and recommendedActions should be empty strings, \
predictedFailure should be false, and confidenceLevel should be low.
",
        equipment_type = request.equipment_type(),
        vibration_data = request.vibration_data(),
        temperature_data = request.temperature_data(),
        history = request.historical_maintenance_records(),
    )
}

/// JSON Schema of the structured output the model must return
pub fn output_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "predictedFailure": {
                "type": "boolean",
                "description": "Whether or not the equipment is predicted to fail."
            },
            "failureReason": {
                "type": "string",
                "description": "The reason for the predicted failure, if any."
            },
            "recommendedActions": {
                "type": "string",
                "description": "Recommended actions to prevent the predicted failure."
            },
            "confidenceLevel": {
                "type": "number",
                "minimum": 0,
                "maximum": 1,
                "description": "Confidence level of the prediction (0-1)."
            }
        },
        "required": ["predictedFailure", "failureReason", "recommendedActions", "confidenceLevel"],
        "additionalProperties": false
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PredictionRequest;
    use crate::predictor::validate;

    fn excavator() -> ValidatedRequest {
        validate(PredictionRequest::new("Excavator", "high", "normal")).unwrap()
    }

    #[test]
    fn test_prompt_contains_fields() {
        let request = validate(
            PredictionRequest::new("Bulldozer", "12.5 mm/s RMS", "95C").with_history("track tensioner replaced"),
        )
        .unwrap();
        let prompt = render_prompt(&request);

        assert!(prompt.contains("Equipment Type: Bulldozer"));
        assert!(prompt.contains("Vibration Data: 12.5 mm/s RMS"));
        assert!(prompt.contains("Temperature Data: 95C"));
        assert!(prompt.contains("Historical Maintenance Records: track tensioner replaced"));
    }

    #[test]
    fn test_prompt_persona_and_defaults_instruction() {
        let prompt = render_prompt(&excavator());

        assert!(prompt.starts_with("You are an expert in predictive maintenance"));
        assert!(prompt.contains("valid JSON"));
        assert!(prompt.contains("predictedFailure should be false"));
        assert!(prompt.contains("confidenceLevel should be low"));
    }

    #[test]
    fn test_prompt_renders_absent_history_as_empty() {
        let prompt = render_prompt(&excavator());
        assert!(prompt.contains("Historical Maintenance Records: \n"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(render_prompt(&excavator()), render_prompt(&excavator()));
    }

    #[test]
    fn test_schema_requires_all_result_fields() {
        let schema = output_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();

        assert_eq!(
            required,
            ["predictedFailure", "failureReason", "recommendedActions", "confidenceLevel"]
        );
        assert_eq!(schema["properties"]["predictedFailure"]["type"], "boolean");
        assert_eq!(schema["properties"]["confidenceLevel"]["type"], "number");
    }
}
