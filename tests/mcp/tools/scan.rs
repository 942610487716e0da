use locale_forge::mcp::{LocaleForgeMcpServer, types::ScanCandidatesParams};
use rmcp::handler::server::wrapper::Parameters;

use crate::{McpTestFixture, assert_pagination, extract_tool_result_json, fixture_small_app};

fn params(root: String, include_localized: Option<bool>) -> Parameters<ScanCandidatesParams> {
    Parameters(ScanCandidatesParams {
        project_root_path: root,
        include_localized,
        limit: None,
        offset: None,
    })
}

#[tokio::test]
async fn test_scan_candidates_plain_by_default() {
    let fixture = fixture_small_app().unwrap();
    let server = LocaleForgeMcpServer::new();

    let result = server
        .scan_candidates(params(fixture.root(), None))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["filesScanned"], 2);
    assert_eq!(json_result["plainCount"], 3);
    assert_eq!(json_result["localizedCount"], 1);
    assert_eq!(json_result["totalCount"], 3);
    assert_eq!(json_result["totalFileCount"], 2);
    assert_pagination(&json_result, 0, 20, false);

    let items = json_result["items"].as_array().unwrap();
    let texts: Vec<&str> = items.iter().map(|i| i["text"].as_str().unwrap()).collect();
    // Footer.tsx sorts before Header.tsx.
    assert_eq!(
        texts,
        vec!["All rights reserved", "Contact us", "Acme Dashboard"]
    );

    let header = &items[2];
    assert_eq!(header["file"], "src/components/Header.tsx");
    assert_eq!(header["line"], 4);
    assert_eq!(header["column"], 10);
    assert_eq!(header["suggestedKey"], "header.acme_dashboard");
    assert_eq!(header["context"], "<h1>Acme Dashboard</h1>");
}

#[tokio::test]
async fn test_scan_candidates_include_localized() {
    let fixture = fixture_small_app().unwrap();
    let server = LocaleForgeMcpServer::new();

    let result = server
        .scan_candidates(params(fixture.root(), Some(true)))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 4);
    let localized: Vec<_> = json_result["items"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|i| i["localized"] == true)
        .collect();
    assert_eq!(localized.len(), 1);
    assert_eq!(localized[0]["keyPath"], "header.logout");
    assert!(localized[0].get("suggestedKey").is_none());
}

#[tokio::test]
async fn test_scan_candidates_pagination() {
    let fixture = fixture_small_app().unwrap();
    let server = LocaleForgeMcpServer::new();

    let first = server
        .scan_candidates(Parameters(ScanCandidatesParams {
            project_root_path: fixture.root(),
            include_localized: None,
            limit: Some(2),
            offset: None,
        }))
        .await
        .unwrap();
    let first = extract_tool_result_json(&first);
    assert_eq!(first["items"].as_array().unwrap().len(), 2);
    assert_pagination(&first, 0, 2, true);

    let second = server
        .scan_candidates(Parameters(ScanCandidatesParams {
            project_root_path: fixture.root(),
            include_localized: None,
            limit: Some(2),
            offset: Some(2),
        }))
        .await
        .unwrap();
    let second = extract_tool_result_json(&second);
    assert_eq!(second["items"].as_array().unwrap().len(), 1);
    assert_eq!(second["items"][0]["text"], "Acme Dashboard");
    assert_pagination(&second, 2, 2, false);
}

#[tokio::test]
async fn test_scan_candidates_limit_is_capped() {
    let fixture = fixture_small_app().unwrap();
    let server = LocaleForgeMcpServer::new();

    let result = server
        .scan_candidates(Parameters(ScanCandidatesParams {
            project_root_path: fixture.root(),
            include_localized: None,
            limit: Some(1000),
            offset: None,
        }))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_pagination(&json_result, 0, 100, false);
}

#[tokio::test]
async fn test_scan_candidates_reports_failures() {
    let fixture = McpTestFixture::with_sources(&[
        ("src/Broken.tsx", "export const Broken = () => <div>\n"),
        ("src/Ok.tsx", "export const Ok = () => <p>Fine</p>;\n"),
    ])
    .unwrap();
    let server = LocaleForgeMcpServer::new();

    let result = server
        .scan_candidates(params(fixture.root(), None))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 1);
    let failures = json_result["failures"].as_array().unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0]["file"], "src/Broken.tsx");
    assert_eq!(failures[0]["kind"], "parse");
}

#[tokio::test]
async fn test_scan_candidates_missing_root_is_error() {
    let fixture = McpTestFixture::new().unwrap();
    let server = LocaleForgeMcpServer::new();
    let missing = fixture.root_path().join("missing");

    let result = server
        .scan_candidates(params(missing.to_string_lossy().to_string(), None))
        .await;

    assert!(result.is_err());
}
