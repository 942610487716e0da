use anyhow::{Context, Result};
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "\u{2713} Created .localeforgerc.json\n");

    let content = test.read_file(".localeforgerc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["functionName"], "t");
    assert_eq!(parsed["namespace"], "ui");
    assert_eq!(parsed["importKind"], "named");
    assert!(parsed["translationFunctions"].is_array());
    assert!(parsed.get("importSource").is_none());
    assert!(content.contains("\n  \"extensions\""), "2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".localeforgerc.json", "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("already exists"));
    assert_eq!(test.read_file(".localeforgerc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_into_source_root() -> Result<()> {
    let test = CliTest::new()?;
    std::fs::create_dir(test.root().join("web"))?;

    let output = test
        .command()
        .args(["init", "--source-root", "web"])
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(test.root().join("web/.localeforgerc.json").exists());

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;
    test.write_file("src/App.tsx", "export const App = () => <div>{t(\"app.title\")}</div>;\n")?;

    let output = test.scan_command().output()?;

    assert!(
        output.status.success(),
        "scan should work with the initialized config. stderr: {}",
        stderr(&output)
    );

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("Usage:"));

    Ok(())
}
