use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::{CliTest, stderr, stdout};

const SIGNUP_FORM: &str = r#"export function SignupForm() {
  return (
    <form>
      <h1>Create your account</h1>
      <button>{t("signup.submit")}</button>
    </form>
  );
}
"#;

#[test]
fn test_reports_untranslated_text() -> Result<()> {
    let test = CliTest::with_file("src/components/SignupForm.tsx", SIGNUP_FORM)?;

    let output = test.scan_command().output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("error: \"Create your account\"  untranslated-text"));
    assert!(out.contains("--> src/components/SignupForm.tsx:4:11"));
    assert!(out.contains("4 | <h1>Create your account</h1>"));
    assert!(out.contains("= note: suggested key: signup_form.create_your_account"));
    assert!(out.contains(
        "= hint: locale-forge wrap src/components/SignupForm.tsx --line 4 --column 10 \
         --text \"Create your account\" --key signup_form.create_your_account"
    ));
    assert!(out.contains("1 problems (1 error, 0 warnings)"));
    assert!(out.contains("note: 1 already wrapped in a translation call"));

    Ok(())
}

#[test]
fn test_clean_project_succeeds() -> Result<()> {
    let test = CliTest::with_file(
        "src/Nav.tsx",
        "export const Nav = () => <nav>{t(\"nav.home\")}</nav>;\n",
    )?;

    let output = test.scan_command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "\u{2713} Scanned 1 source file - no untranslated text found (1 translation call)\n"
    );

    Ok(())
}

#[test]
fn test_json_format() -> Result<()> {
    let test = CliTest::with_file("src/components/SignupForm.tsx", SIGNUP_FORM)?;

    let result = test.scan_json()?;

    assert_eq!(result["filesScanned"], 1);
    assert_eq!(result["plainCount"], 1);
    assert_eq!(result["localizedCount"], 1);

    let candidates = result["candidates"].as_array().unwrap();
    assert_eq!(candidates.len(), 2);

    let plain = &candidates[0];
    assert_eq!(plain["text"], "Create your account");
    assert_eq!(plain["file"], "src/components/SignupForm.tsx");
    assert_eq!(plain["line"], 4);
    assert_eq!(plain["column"], 10);
    assert_eq!(plain["context"], "<h1>Create your account</h1>");
    assert_eq!(plain["localized"], false);
    assert_eq!(plain["suggestedKey"], "signup_form.create_your_account");
    assert_eq!(plain["id"].as_str().unwrap().len(), 32);

    let localized = &candidates[1];
    assert_eq!(localized["text"], "signup.submit");
    assert_eq!(localized["keyPath"], "signup.submit");
    assert_eq!(localized["line"], 5);
    assert_eq!(localized["column"], 15);
    assert_eq!(localized["localized"], true);
    assert!(localized.get("suggestedKey").is_none());

    Ok(())
}

#[test]
fn test_json_ids_stable_across_scans() -> Result<()> {
    let test = CliTest::with_file("src/components/SignupForm.tsx", SIGNUP_FORM)?;

    let first = test.scan_json()?;
    let second = test.scan_json()?;

    assert_eq!(first["candidates"], second["candidates"]);

    Ok(())
}

#[test]
fn test_plain_only() -> Result<()> {
    let test = CliTest::with_file("src/components/SignupForm.tsx", SIGNUP_FORM)?;

    let output = test
        .scan_command()
        .args(["--format", "json", "--plain-only"])
        .output()?;
    let result: Value = serde_json::from_slice(&output.stdout)?;

    let candidates = result["candidates"].as_array().unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0]["text"], "Create your account");

    Ok(())
}

#[test]
fn test_bundle_format() -> Result<()> {
    let test = CliTest::with_file("src/components/SignupForm.tsx", SIGNUP_FORM)?;
    test.write_file(
        "src/Footer.tsx",
        "export const Footer = () => <footer><span>All rights reserved</span></footer>;\n",
    )?;

    let output = test.scan_command().args(["--format", "bundle"]).output()?;
    let bundle: Value = serde_json::from_slice(&output.stdout)?;

    assert_eq!(
        bundle,
        json!({
            "footer": { "all_rights_reserved": "All rights reserved" },
            "signup_form": { "create_your_account": "Create your account" }
        })
    );

    Ok(())
}

#[test]
fn test_parse_failure_does_not_stop_scan() -> Result<()> {
    let test = CliTest::with_file("src/Broken.tsx", "export const Broken = () => <div>\n")?;
    test.write_file(
        "src/Good.tsx",
        "export const Good = () => <p>Still scanned</p>;\n",
    )?;

    let output = test.scan_command().output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(2));
    assert!(out.contains("error: \"could not parse file\"  parse-error"));
    assert!(out.contains("--> src/Broken.tsx"));
    assert!(out.contains("error: \"Still scanned\"  untranslated-text"));
    assert!(out.contains("2 problems (2 errors, 0 warnings)"));

    Ok(())
}

#[test]
fn test_parse_failure_in_json_output() -> Result<()> {
    let test = CliTest::with_file("src/Broken.tsx", "export const Broken = () => <div>\n")?;

    let output = test.scan_command().args(["--format", "json"]).output()?;
    let result: Value = serde_json::from_slice(&output.stdout)?;

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(result["failures"][0]["file"], "src/Broken.tsx");
    assert_eq!(result["failures"][0]["kind"], "parse");
    assert!(stderr(&output).contains("1 file(s) could not be scanned (use -v for details)"));

    Ok(())
}

#[test]
fn test_include_limits_scan() -> Result<()> {
    let test = CliTest::with_file("src/App.tsx", "export const App = () => <p>In src</p>;\n")?;
    test.write_file(
        "scripts/Tool.tsx",
        "export const Tool = () => <p>In scripts</p>;\n",
    )?;

    let output = test
        .scan_command()
        .args(["--include", "src", "--format", "json"])
        .output()?;
    let result: Value = serde_json::from_slice(&output.stdout)?;

    let texts: Vec<&str> = result["candidates"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["In src"]);

    Ok(())
}

#[test]
fn test_default_and_extra_ignores() -> Result<()> {
    let test = CliTest::with_file("src/App.tsx", "export const App = () => <p>Kept</p>;\n")?;
    test.write_file(
        "node_modules/pkg/index.jsx",
        "export const X = () => <p>Vendored</p>;\n",
    )?;
    test.write_file(
        "src/App.stories.tsx",
        "export const Story = () => <p>Story</p>;\n",
    )?;
    test.write_file(
        ".storybook/Preview.tsx",
        "export const Preview = () => <p>Hidden</p>;\n",
    )?;

    let output = test
        .scan_command()
        .args(["--ignore", "**/*.stories.tsx", "--format", "json"])
        .output()?;
    let result: Value = serde_json::from_slice(&output.stdout)?;

    assert_eq!(result["filesScanned"], 1);
    assert_eq!(result["candidates"][0]["text"], "Kept");

    Ok(())
}

#[test]
fn test_config_file_is_used() -> Result<()> {
    let test = CliTest::with_file(
        "src/Menu.tsx",
        "export const Menu = () => <ul><li>{i18n.t(\"menu.home\")}</li><li>{t(\"menu.about\")}</li></ul>;\n",
    )?;
    test.write_file(
        ".localeforgerc.json",
        r#"{ "translationFunctions": ["i18n.t"], "extensions": ["tsx"] }"#,
    )?;

    let result = test.scan_json()?;

    let keys: Vec<&str> = result["candidates"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c["keyPath"].as_str())
        .collect();
    assert_eq!(keys, vec!["menu.home"]);

    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_file(".localeforgerc.json", r#"{ "ignores": ["[broken"] }"#)?;

    let output = test.scan_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Invalid glob pattern in 'ignores'"));

    Ok(())
}

#[test]
fn test_verbose_notes_missing_config() -> Result<()> {
    let test = CliTest::with_file("src/App.tsx", "export const App = () => null;\n")?;

    let output = test.scan_command().arg("-v").output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stderr(&output).contains("No .localeforgerc.json found, using default configuration"));

    Ok(())
}

#[test]
fn test_source_root_flag() -> Result<()> {
    let test = CliTest::with_file(
        "web/src/Hero.tsx",
        "export const Hero = () => <h2>Launch faster</h2>;\n",
    )?;

    let output = test
        .scan_command()
        .args(["--source-root", "web", "--format", "json"])
        .output()?;
    let result: Value = serde_json::from_slice(&output.stdout)?;

    assert_eq!(result["candidates"][0]["file"], "src/Hero.tsx");
    assert_eq!(result["candidates"][0]["suggestedKey"], "hero.launch_faster");

    Ok(())
}
