use locale_forge::mcp::{LocaleForgeMcpServer, types::SuggestKeyParams};
use rmcp::handler::server::wrapper::Parameters;

use crate::extract_tool_result_json;

#[tokio::test]
async fn test_suggest_key_from_file() {
    let server = LocaleForgeMcpServer::new();

    let result = server
        .suggest_key(Parameters(SuggestKeyParams {
            text: "Create your account".to_string(),
            namespace: None,
            file: Some("components/forms/SignupForm.tsx".to_string()),
        }))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["key"], "signup_form.create_your_account");
    assert_eq!(json_result["namespace"], "signup_form");
}

#[tokio::test]
async fn test_suggest_key_namespace_wins() {
    let server = LocaleForgeMcpServer::new();

    let result = server
        .suggest_key(Parameters(SuggestKeyParams {
            text: "Save".to_string(),
            namespace: Some("settings".to_string()),
            file: Some("components/forms/SignupForm.tsx".to_string()),
        }))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["key"], "settings.save");
}

#[tokio::test]
async fn test_suggest_key_defaults_to_ui() {
    let server = LocaleForgeMcpServer::new();

    let result = server
        .suggest_key(Parameters(SuggestKeyParams {
            text: "Welcome back".to_string(),
            namespace: None,
            file: None,
        }))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["key"], "ui.welcome_back");
}

#[tokio::test]
async fn test_suggest_key_rejects_blank_text() {
    let server = LocaleForgeMcpServer::new();

    let result = server
        .suggest_key(Parameters(SuggestKeyParams {
            text: "   ".to_string(),
            namespace: None,
            file: None,
        }))
        .await;

    assert!(result.is_err());
}
