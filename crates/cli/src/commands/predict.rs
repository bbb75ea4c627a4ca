//! Prediction command

use anyhow::{Context, Result};
use clap::Args;
use predictor_lib::{predictor::validate, PredictionRequest, PredictionResult};
use std::path::Path;
use tabled::Tabled;

use crate::client::ApiClient;
use crate::output::{
    color_confidence, color_maintenance_status, or_dash, print_success, print_warning,
    OutputFormat,
};

/// Row for the prediction table
#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

/// Sensor readings gathered from the command line
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Type of equipment being monitored (e.g., Excavator)
    #[arg(long, short = 'e')]
    pub equipment_type: String,

    /// Vibration sensor data
    #[arg(long, short = 'v')]
    pub vibration_data: String,

    /// Temperature sensor data
    #[arg(long, short = 't')]
    pub temperature_data: String,

    /// Historical maintenance records
    #[arg(long)]
    pub history: Option<String>,

    /// Read historical maintenance records from a file
    #[arg(long, conflicts_with = "history")]
    pub history_file: Option<String>,
}

impl PredictArgs {
    /// Build the request, reading the history file if one was given
    pub fn into_request(self) -> Result<PredictionRequest> {
        let history = match (self.history, self.history_file) {
            (_, Some(path)) => Some(read_history(Path::new(&path))?),
            (history, None) => history,
        };

        Ok(PredictionRequest {
            equipment_type: self.equipment_type,
            vibration_data: self.vibration_data,
            temperature_data: self.temperature_data,
            historical_maintenance_records: history,
        })
    }
}

fn read_history(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read maintenance history from {}", path.display()))
}

/// Submit a prediction request and print the result
pub async fn predict(client: &ApiClient, args: PredictArgs, format: OutputFormat) -> Result<()> {
    let request = args.into_request()?;

    // Reject locally before making a network call
    validate(request.clone())?;

    let result = client.predict(&request).await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result)?;
            println!("{}", json);
        }
        OutputFormat::Table => print_result(&request, &result),
    }

    Ok(())
}

fn print_result(request: &PredictionRequest, result: &PredictionResult) {
    if result.is_degraded() {
        print_warning(&result.failure_reason);
        println!("{}", result.recommended_actions);
        return;
    }

    let rows = vec![
        FieldRow {
            field: "Equipment",
            value: request.equipment_type.clone(),
        },
        FieldRow {
            field: "Predicted Failure",
            value: if result.predicted_failure { "yes" } else { "no" }.to_string(),
        },
        FieldRow {
            field: "Reason",
            value: or_dash(&result.failure_reason),
        },
        FieldRow {
            field: "Recommended Actions",
            value: or_dash(&result.recommended_actions),
        },
        FieldRow {
            field: "Confidence",
            value: color_confidence(result.confidence_level),
        },
        FieldRow {
            field: "Status",
            value: color_maintenance_status(result.suggested_status()),
        },
    ];

    let table = tabled::Table::new(rows)
        .with(tabled::settings::Style::rounded())
        .to_string();
    println!("{}", table);

    if result.predicted_failure {
        print_warning("Failure predicted, schedule maintenance");
    } else {
        print_success("No failure predicted");
    }
    println!(
        "\nGenerated at {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
}
