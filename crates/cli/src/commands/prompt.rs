//! Local prompt rendering, for inspecting what the model receives

use anyhow::Result;
use predictor_lib::predictor::{output_schema, render_prompt, validate};

use crate::commands::predict::PredictArgs;

/// Print the prompt the server would send for these readings
pub fn show_prompt(args: PredictArgs) -> Result<()> {
    let validated = validate(args.into_request()?)?;
    print!("{}", render_prompt(&validated));
    Ok(())
}

/// Print the JSON Schema the model output must follow
pub fn show_schema() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&output_schema())?);
    Ok(())
}
