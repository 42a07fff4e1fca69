use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(
        parsed["identityColumns"],
        serde_json::json!(["Timestamp", "Name", "Roll No", "Class"])
    );
    assert_eq!(parsed["defaultInput"], "feedback.csv");
    assert_eq!(parsed["translation"]["enabled"], true);
    assert_eq!(parsed["translation"]["timeoutSecs"], 10);

    assert!(
        content.contains("  "),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "✓ Created .feelbackrc.json\n");

    assert!(test.root().join(".feelbackrc.json").exists());
    let content = test.read_file(".feelbackrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".feelbackrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output), "error: .feelbackrc.json already exists\n");
    assert_eq!(test.read_file(".feelbackrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file("feedback.csv", "Timestamp,Comments\nt1,yes\n")?;

    let output = test.analyze_command().output()?;
    assert!(
        output.status.success(),
        "Analyze should work with initialized config. stderr: {}",
        stderr(&output)
    );

    Ok(())
}
