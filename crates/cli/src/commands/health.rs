//! Server health command

use anyhow::Result;
use serde_json::json;
use tabled::Tabled;

use crate::client::ApiClient;
use crate::output::{color_component_status, or_dash, print_success, print_warning, OutputFormat};

#[derive(Tabled)]
struct ComponentRow {
    #[tabled(rename = "Component")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Message")]
    message: String,
}

/// Show server health and readiness
pub async fn show_health(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let health = client.health().await?;
    let readiness = client.readiness().await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&json!({
                "health": health,
                "readiness": readiness,
            }))?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            let mut rows: Vec<ComponentRow> = health
                .components
                .iter()
                .map(|(name, component)| ComponentRow {
                    name: name.clone(),
                    status: color_component_status(component.status),
                    message: or_dash(component.message.as_deref().unwrap_or_default()),
                })
                .collect();
            rows.sort_by(|a, b| a.name.cmp(&b.name));

            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);
            println!("\nOverall: {}", color_component_status(health.status));

            if readiness.ready {
                print_success("Server is ready");
            } else {
                print_warning(&format!(
                    "Server not ready: {}",
                    readiness.reason.as_deref().unwrap_or("unknown")
                ));
            }
        }
    }

    Ok(())
}
