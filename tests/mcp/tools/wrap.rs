use std::fs;

use locale_forge::mcp::{
    LocaleForgeMcpServer,
    types::{ScanCandidatesParams, WrapTranslationParams},
};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::{Value, json};

use crate::{
    McpTestFixture, extract_tool_error_json, extract_tool_result_json, fixture_small_app,
};

fn wrap_params(root: String, item: &Value, key: &str) -> WrapTranslationParams {
    WrapTranslationParams {
        project_root_path: root,
        file_path: item["file"].as_str().unwrap().to_string(),
        text: item["text"].as_str().unwrap().to_string(),
        line: item["line"].as_u64().unwrap() as usize,
        column: item["column"].as_u64().unwrap() as usize,
        key: key.to_string(),
        function_name: None,
        import_source: None,
        import_kind: None,
        skip_import: None,
    }
}

async fn scan_items(server: &LocaleForgeMcpServer, fixture: &McpTestFixture) -> Vec<Value> {
    let result = server
        .scan_candidates(Parameters(ScanCandidatesParams {
            project_root_path: fixture.root(),
            include_localized: None,
            limit: None,
            offset: None,
        }))
        .await
        .unwrap();
    extract_tool_result_json(&result)["items"]
        .as_array()
        .unwrap()
        .clone()
}

#[tokio::test]
async fn test_wrap_scanned_candidate() {
    let fixture = fixture_small_app().unwrap();
    let server = LocaleForgeMcpServer::new();
    let before = fixture.read_source("src/components/Header.tsx").unwrap();

    let items = scan_items(&server, &fixture).await;
    let header = items
        .iter()
        .find(|i| i["text"] == "Acme Dashboard")
        .unwrap();
    let key = header["suggestedKey"].as_str().unwrap();

    let result = server
        .wrap_translation(Parameters(wrap_params(fixture.root(), header, key)))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["success"], true);
    assert_eq!(json_result["importChange"], "skipped");
    assert!(json_result.get("dependencyInstalled").is_none());

    let after = fixture.read_source("src/components/Header.tsx").unwrap();
    assert_eq!(
        after,
        before.replace(
            "<h1>Acme Dashboard</h1>",
            "<h1>{t(\"header.acme_dashboard\")}</h1>"
        )
    );

    // The wrapped text is now a translation call, not a candidate.
    let items = scan_items(&server, &fixture).await;
    assert!(items.iter().all(|i| i["text"] != "Acme Dashboard"));
}

#[tokio::test]
async fn test_wrap_with_import_reports_dependency() {
    let fixture = fixture_small_app().unwrap();
    fs::create_dir_all(fixture.root_path().join("node_modules/react-i18next")).unwrap();
    let server = LocaleForgeMcpServer::new();

    let items = scan_items(&server, &fixture).await;
    let footer = &items[0];

    let mut params = wrap_params(fixture.root(), footer, "footer.rights");
    params.import_source = Some("react-i18next".to_string());

    let result = server
        .wrap_translation(Parameters(params))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["importChange"], "declarationAdded");
    assert_eq!(json_result["dependencyInstalled"], true);
    assert!(json_result.get("installCommand").is_none());

    let content = fixture.read_source("src/components/Footer.tsx").unwrap();
    assert!(content.starts_with("import { t } from \"react-i18next\";\nexport function Footer()"));
    assert!(content.contains("<span>{t(\"footer.rights\")}</span>"));
    assert!(content.contains("<span>Contact us</span>"));
}

#[tokio::test]
async fn test_wrap_two_candidates_in_one_file_imports_once() {
    let fixture = fixture_small_app().unwrap();
    fixture
        .write_config(&json!({ "importSource": "react-i18next" }))
        .unwrap();
    let server = LocaleForgeMcpServer::new();

    let items = scan_items(&server, &fixture).await;
    let rights = items[0].clone();
    let contact = items[1].clone();

    let first = server
        .wrap_translation(Parameters(wrap_params(fixture.root(), &rights, "footer.rights")))
        .await
        .unwrap();
    let first = extract_tool_result_json(&first);
    assert_eq!(first["importChange"], "declarationAdded");
    assert_eq!(first["dependencyInstalled"], false);
    assert_eq!(first["installCommand"], "npm install react-i18next");

    // The inserted import shifts every line down by one; rescan first.
    let items = scan_items(&server, &fixture).await;
    let contact_now = items.iter().find(|i| i["text"] == "Contact us").unwrap();
    assert_eq!(
        contact_now["line"].as_u64().unwrap(),
        contact["line"].as_u64().unwrap() + 1
    );

    let second = server
        .wrap_translation(Parameters(wrap_params(fixture.root(), contact_now, "footer.contact")))
        .await
        .unwrap();
    assert_eq!(
        extract_tool_result_json(&second)["importChange"],
        "alreadyPresent"
    );

    let content = fixture.read_source("src/components/Footer.tsx").unwrap();
    assert_eq!(content.matches("import { t }").count(), 1);
    assert!(content.contains("{t(\"footer.contact\")}"));
}

#[tokio::test]
async fn test_wrap_stale_location_is_tool_error() {
    let fixture = fixture_small_app().unwrap();
    let server = LocaleForgeMcpServer::new();
    let before = fixture.read_source("src/components/Footer.tsx").unwrap();

    let items = scan_items(&server, &fixture).await;
    let mut params = wrap_params(fixture.root(), &items[0], "footer.rights");
    params.line += 1;

    let result = server
        .wrap_translation(Parameters(params))
        .await
        .unwrap();
    let error = extract_tool_error_json(&result);

    assert_eq!(error["success"], false);
    assert_eq!(error["kind"], "staleLocation");
    assert!(error["error"].as_str().unwrap().contains("scan again"));
    assert_eq!(
        fixture.read_source("src/components/Footer.tsx").unwrap(),
        before
    );
}

#[tokio::test]
async fn test_wrap_invalid_input_is_tool_error() {
    let fixture = fixture_small_app().unwrap();
    let server = LocaleForgeMcpServer::new();

    let items = scan_items(&server, &fixture).await;
    let params = wrap_params(fixture.root(), &items[0], "  ");

    let result = server
        .wrap_translation(Parameters(params))
        .await
        .unwrap();
    let error = extract_tool_error_json(&result);

    assert_eq!(error["kind"], "invalidInput");
}
