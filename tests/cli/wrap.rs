use std::process::Output;

use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

const PROFILE: &str = r#"export function Profile({ user }) {
  return (
    <section>
      <h2>Your profile</h2>
      <input placeholder="Display name" />
      <p>{user.name}</p>
    </section>
  );
}
"#;

fn wrap_candidate(test: &CliTest, candidate: &Value, key: &str) -> Result<Output> {
    let line = candidate["line"].to_string();
    let column = candidate["column"].to_string();
    let output = test
        .wrap_command()
        .arg(candidate["file"].as_str().unwrap())
        .args(["--line", &line, "--column", &column])
        .args(["--text", candidate["text"].as_str().unwrap()])
        .args(["--key", key])
        .output()?;
    Ok(output)
}

#[test]
fn test_scan_then_wrap() -> Result<()> {
    let test = CliTest::with_file("src/Profile.jsx", PROFILE)?;

    let scan = test.scan_json()?;
    let candidate = &scan["candidates"][0];
    assert_eq!(candidate["text"], "Your profile");

    let output = wrap_candidate(&test, candidate, "profile.title")?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains(
        "\u{2713} Wrapped \"Your profile\" in src/Profile.jsx:4:10 with t(\"profile.title\")"
    ));
    assert_eq!(
        test.read_file("src/Profile.jsx")?,
        PROFILE.replace("<h2>Your profile</h2>", "<h2>{t(\"profile.title\")}</h2>")
    );

    Ok(())
}

#[test]
fn test_wrap_adds_import() -> Result<()> {
    let test = CliTest::with_file("src/Profile.jsx", PROFILE)?;

    let output = test
        .wrap_command()
        .args(["src/Profile.jsx", "--line", "4", "--column", "10"])
        .args(["--text", "Your profile", "--key", "profile.title"])
        .args(["--import-source", "react-i18next"])
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("import: react-i18next (import declaration added)"));
    assert!(
        stderr(&output).contains("warning: package `react-i18next` is not installed under")
    );
    assert!(stderr(&output).contains("help: run `npm install react-i18next`"));

    let expected = format!(
        "import {{ t }} from \"react-i18next\";\n{}",
        PROFILE.replace("<h2>Your profile</h2>", "<h2>{t(\"profile.title\")}</h2>")
    );
    assert_eq!(test.read_file("src/Profile.jsx")?, expected);

    Ok(())
}

#[test]
fn test_wrap_uses_config_defaults() -> Result<()> {
    let test = CliTest::with_file("src/Profile.jsx", PROFILE)?;
    test.write_file(
        ".localeforgerc.json",
        r#"{ "functionName": "i18n.t", "importSource": "@/lib/i18n", "importKind": "default" }"#,
    )?;

    let output = test
        .wrap_command()
        .args(["src/Profile.jsx", "--line", "4", "--column", "10"])
        .args(["--text", "Your profile", "--key", "profile.title"])
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(!stderr(&output).contains("not installed"));
    let content = test.read_file("src/Profile.jsx")?;
    assert!(content.starts_with("import i18n from \"@/lib/i18n\";\n"));
    assert!(content.contains("<h2>{i18n.t(\"profile.title\")}</h2>"));

    Ok(())
}

#[test]
fn test_wrap_attribute_then_rescan() -> Result<()> {
    let test = CliTest::with_file("src/Profile.jsx", PROFILE)?;

    let output = test
        .wrap_command()
        .args(["src/Profile.jsx", "--line", "5", "--column", "25"])
        .args(["--text", "Display name", "--key", "profile.display_name"])
        .output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let content = test.read_file("src/Profile.jsx")?;
    assert!(content.contains("<input placeholder={t(\"profile.display_name\")} />"));

    let scan = test.scan_json()?;
    let keys: Vec<&str> = scan["candidates"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c["keyPath"].as_str())
        .collect();
    assert_eq!(keys, vec!["profile.display_name"]);

    Ok(())
}

#[test]
fn test_stale_location_fails_without_writing() -> Result<()> {
    let test = CliTest::with_file("src/Profile.jsx", PROFILE)?;

    let output = test
        .wrap_command()
        .args(["src/Profile.jsx", "--line", "4", "--column", "11"])
        .args(["--text", "Your profile", "--key", "profile.title"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.contains("error:"));
    assert!(err.contains("src/Profile.jsx:4:11"));
    assert!(err.contains("staleLocation"));
    assert_eq!(test.read_file("src/Profile.jsx")?, PROFILE);

    Ok(())
}

#[test]
fn test_invalid_function_name() -> Result<()> {
    let test = CliTest::with_file("src/Profile.jsx", PROFILE)?;

    let output = test
        .wrap_command()
        .args(["src/Profile.jsx", "--line", "4", "--column", "10"])
        .args(["--text", "Your profile", "--key", "profile.title"])
        .args(["--function", "t()"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("invalidFunctionName"));
    assert_eq!(test.read_file("src/Profile.jsx")?, PROFILE);

    Ok(())
}

#[test]
fn test_missing_file() -> Result<()> {
    let test = CliTest::new()?;

    let output = test
        .wrap_command()
        .args(["src/Nope.tsx", "--line", "1", "--column", "0"])
        .args(["--text", "Hi", "--key", "nope.hi"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("  io\n"));

    Ok(())
}
