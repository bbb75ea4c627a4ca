//! CLI integration tests

use std::process::{Command, Output};

fn efp(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_efp"))
        .args(args)
        .env_remove("EFP_API_URL")
        .output()
        .expect("Failed to execute command")
}

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let output = efp(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI help should succeed");
    assert!(
        stdout.contains("Equipment Failure Predictor"),
        "Should show app name"
    );
    assert!(stdout.contains("predict"), "Should show predict command");
    assert!(stdout.contains("health"), "Should show health command");
    assert!(stdout.contains("prompt"), "Should show prompt command");
    assert!(stdout.contains("schema"), "Should show schema command");
}

/// Test that the CLI shows version
#[test]
fn test_cli_version() {
    let output = efp(&["--version"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI version should succeed");
    assert!(stdout.contains("efp"), "Should show binary name");
}

/// Test predict subcommand help
#[test]
fn test_predict_help() {
    let output = efp(&["predict", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Predict help should succeed");
    assert!(stdout.contains("--equipment-type"));
    assert!(stdout.contains("--vibration-data"));
    assert!(stdout.contains("--temperature-data"));
    assert!(stdout.contains("--history"));
    assert!(stdout.contains("--history-file"));
}

/// Test that predict requires the sensor readings
#[test]
fn test_predict_requires_readings() {
    let output = efp(&["predict", "--equipment-type", "Excavator"]);

    assert!(!output.status.success(), "Missing readings should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--vibration-data"));
}

/// Empty readings are rejected locally, before any request is sent
#[test]
fn test_predict_rejects_blank_equipment_type() {
    let output = efp(&[
        "--api-url",
        "http://127.0.0.1:9",
        "predict",
        "--equipment-type",
        " ",
        "--vibration-data",
        "high",
        "--temperature-data",
        "normal",
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Equipment type is required"), "stderr: {}", stderr);
}

/// Test local prompt rendering
#[test]
fn test_prompt_renders_readings() {
    let output = efp(&[
        "prompt",
        "--equipment-type",
        "Excavator",
        "--vibration-data",
        "high",
        "--temperature-data",
        "normal",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Prompt should succeed");
    assert!(stdout.contains("You are an expert in predictive maintenance"));
    assert!(stdout.contains("Equipment Type: Excavator"));
    assert!(stdout.contains("Historical Maintenance Records: \n"));
}

/// Test that the schema command prints the output schema
#[test]
fn test_schema_is_json() {
    let output = efp(&["schema"]);
    assert!(output.status.success(), "Schema should succeed");

    let schema: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Schema should be valid JSON");
    assert_eq!(schema["properties"]["predictedFailure"]["type"], "boolean");
}

/// Offline commands ignore an unreadable config file
#[test]
fn test_offline_commands_skip_config_file() {
    let home = tempfile::TempDir::new().unwrap();
    let config_dir = home.path().join(".config").join("efp");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.json"), "{ nope").unwrap();

    let run = |args: &[&str]| {
        Command::new(env!("CARGO_BIN_EXE_efp"))
            .args(args)
            .env("HOME", home.path())
            .env_remove("EFP_API_URL")
            .output()
            .expect("Failed to execute command")
    };

    let prompt = run(&[
        "prompt",
        "--equipment-type",
        "Excavator",
        "--vibration-data",
        "high",
        "--temperature-data",
        "normal",
    ]);
    assert!(prompt.status.success(), "Prompt should not read the config file");
    assert!(run(&["schema"]).status.success(), "Schema should not read the config file");

    let show = run(&["config", "show"]);
    assert!(!show.status.success(), "Config show should report the corrupt file");
    assert!(String::from_utf8_lossy(&show.stderr).contains("Failed to parse config file"));
}

/// Test format option in help
#[test]
fn test_format_option() {
    let output = efp(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("--format"), "Should show format option");
    assert!(stdout.contains("--api-url"), "Should show api-url option");
}
