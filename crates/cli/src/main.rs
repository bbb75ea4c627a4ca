//! Equipment Failure Predictor CLI
//!
//! A command-line tool for requesting failure predictions from the
//! prediction server and inspecting what the model is asked.

mod client;
mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{health, predict, prompt};

/// Equipment Failure Predictor CLI
#[derive(Parser)]
#[command(name = "efp")]
#[command(author, version, about = "CLI for the Equipment Failure Predictor", long_about = None)]
pub struct Cli {
    /// Prediction server URL (falls back to the config file, then http://localhost:8080)
    #[arg(long, env = "EFP_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(long, short, default_value = "table", global = true)]
    pub format: output::OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Predict equipment failure from sensor readings
    Predict(predict::PredictArgs),

    /// Show prediction server health and readiness
    Health,

    /// Render the model prompt locally without calling the server
    Prompt(predict::PredictArgs),

    /// Print the JSON Schema the model output must follow
    Schema,

    /// Manage CLI configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Save the prediction server URL to the config file
    SetUrl {
        /// Server URL (e.g., http://predictor:8080)
        url: String,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run(Cli::parse()).await {
        output::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Predict(args) => {
            let client = api_client(cli.api_url)?;
            predict::predict(&client, args, cli.format).await?;
        }
        Commands::Health => {
            let client = api_client(cli.api_url)?;
            health::show_health(&client, cli.format).await?;
        }
        Commands::Prompt(args) => prompt::show_prompt(args)?,
        Commands::Schema => prompt::show_schema()?,
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Show => {
                let api_url = config::Config::load()?.resolve_api_url(cli.api_url);
                output::print_info(&format!("API URL: {}", api_url));
            }
            ConfigCommands::SetUrl { url } => {
                url::Url::parse(&url)?;
                let updated = config::Config { api_url: Some(url) };
                let path = updated.save()?;
                output::print_success(&format!("Saved configuration to {}", path.display()));
            }
        },
    }

    Ok(())
}

/// Client for the server URL from the flag, env or config file
fn api_client(explicit: Option<String>) -> Result<client::ApiClient> {
    let api_url = config::Config::load()?.resolve_api_url(explicit);
    client::ApiClient::new(&api_url)
}
