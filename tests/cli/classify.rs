use anyhow::Result;
use insta::assert_snapshot;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_classify_short_answers() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.classify_command().args(["yes", "no"]).output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert_snapshot!(stdout(&output), @r"
    ╒══════════╤═══════════╤═══════╕
    │ Feedback │ Sentiment │ Score │
    ╞══════════╪═══════════╪═══════╡
    │ yes      │ Positive  │  0.30 │
    ├──────────┼───────────┼───────┤
    │ no       │ Negative  │ -0.30 │
    ╘══════════╧═══════════╧═══════╛
    ");

    Ok(())
}

#[test]
fn test_classify_json() -> Result<()> {
    let test = CliTest::new()?;

    let output = test
        .classify_command()
        .args(["--format", "json", "Great job", "   "])
        .output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));

    let json: Value = serde_json::from_str(&stdout(&output))?;
    let responses = json["responses"].as_array().unwrap();
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["feedback"], "Great job");
    assert!(responses[0]["score"].as_f64().unwrap() > 0.2);
    assert_eq!(responses[1]["sentiment"], "Neutral");
    assert_eq!(responses[1]["score"], 0.0);

    Ok(())
}

#[test]
fn test_classify_verbose_lists_degradations() -> Result<()> {
    let test = CliTest::new()?;

    let output = test
        .classify_command()
        .args(["-v", "Great job"])
        .output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert!(
        stderr(&output).contains("note: \"Great job\": language not detected, scored as written"),
        "{}",
        stderr(&output)
    );

    Ok(())
}

#[test]
fn test_classify_requires_text() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("classify").output()?;
    assert_eq!(output.status.code(), Some(2));

    Ok(())
}
