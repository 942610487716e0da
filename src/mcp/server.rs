use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde::Serialize;

use crate::{
    config::load_config,
    core::{
        ReviewCandidate, ScanContext, ScanOverrides,
        codemod::{
            ImportChange, TranslationTarget, apply_patch, install_command, is_package_installed,
        },
        keygen::{namespace_from_file, suggest_key},
    },
};

use super::types::{
    CandidateScanResult, ConfigDto, ConfigValues, GetConfigParams, Pagination,
    ScanCandidatesParams, SuggestKeyParams, SuggestKeyResult, WrapTranslationError,
    WrapTranslationParams, WrapTranslationResult,
};

const DEFAULT_PAGE_SIZE: usize = 20;
const MAX_PAGE_SIZE: usize = 100;

#[derive(Clone)]
pub struct LocaleForgeMcpServer {
    tool_router: ToolRouter<Self>,
}

impl Default for LocaleForgeMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl LocaleForgeMcpServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    /// Get the current configuration
    #[tool(description = "Get the locale-forge configuration of a project.")]
    pub async fn get_config(
        &self,
        params: Parameters<GetConfigParams>,
    ) -> Result<CallToolResult, McpError> {
        let path = Path::new(&params.0.project_root_path);

        let result = load_config(path)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {}", e), None))?;

        to_json_result(&ConfigDto {
            from_file: result.from_file,
            config: ConfigValues::from(result.config),
        })
    }

    /// Scan a project for localizable text
    #[tool(
        description = "Scan JSX/TSX sources for text that is not wrapped in a translation call yet. Each plain item carries a suggestedKey. Pass an item's file/text/line/column unchanged (as filePath/text/line/column) to wrap_translation. Returns a paginated list."
    )]
    pub async fn scan_candidates(
        &self,
        params: Parameters<ScanCandidatesParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let limit = params
            .limit
            .map(|v| v as usize)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE);
        let offset = params.offset.map(|v| v as usize).unwrap_or(0);
        let include_localized = params.include_localized.unwrap_or(false);

        let ctx = ScanContext::new(&ScanOverrides {
            source_root: Some(PathBuf::from(&params.project_root_path)),
            ..Default::default()
        })
        .map_err(|e| McpError::internal_error(format!("Failed to initialize: {}", e), None))?;

        let report = ctx.scan();
        let namespace = &ctx.config.namespace;

        let all_items: Vec<ReviewCandidate> = report
            .candidates
            .iter()
            .filter(|c| include_localized || !c.localized)
            .map(|c| ReviewCandidate::new(c.clone(), namespace))
            .collect();

        let total_count = all_items.len();
        let total_file_count = all_items
            .iter()
            .map(|item| item.candidate.file.as_str())
            .collect::<HashSet<_>>()
            .len();

        let items: Vec<ReviewCandidate> = all_items.into_iter().skip(offset).take(limit).collect();
        let has_more = offset + items.len() < total_count;

        to_json_result(&CandidateScanResult {
            files_scanned: report.files_scanned,
            plain_count: report.plain().count(),
            localized_count: report.localized().count(),
            total_count,
            total_file_count,
            items,
            failures: report.failures.clone(),
            pagination: Pagination {
                offset,
                limit,
                has_more,
            },
        })
    }

    /// Suggest a localization key
    #[tool(
        description = "Suggest a dotted localization key for a piece of text. The namespace comes from `namespace`, else from the name of `file`, else 'ui'."
    )]
    pub async fn suggest_key(
        &self,
        params: Parameters<SuggestKeyParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        if params.text.trim().is_empty() {
            return Err(McpError::invalid_params("text cannot be empty", None));
        }

        let fallback = crate::config::Config::default().namespace;
        let namespace = match (params.namespace.as_deref().map(str::trim), &params.file) {
            (Some(ns), _) if !ns.is_empty() => ns.to_string(),
            (_, Some(file)) => namespace_from_file(file, &fallback),
            _ => fallback,
        };

        to_json_result(&SuggestKeyResult {
            key: suggest_key(&params.text, &namespace),
            namespace,
        })
    }

    /// Wrap one scanned literal in a translation call
    #[tool(
        description = "Replace one scanned literal with a translation call (e.g. t(\"key\")) and add the import if needed. Only the literal and the import change; the rest of the file is left byte-for-byte intact. Fails with kind 'staleLocation' if the file changed since the scan."
    )]
    pub async fn wrap_translation(
        &self,
        params: Parameters<WrapTranslationParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let root = PathBuf::from(&params.project_root_path);

        let config = load_config(&root)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {}", e), None))?
            .config;

        let target = TranslationTarget {
            file_path: params.file_path,
            text: params.text,
            line: params.line,
            column: params.column,
            key: params.key,
            function_name: params.function_name.unwrap_or(config.function_name),
            import_source: params.import_source.or(config.import_source),
            import_kind: params.import_kind.unwrap_or(config.import_kind),
            skip_import: params.skip_import.unwrap_or(config.skip_import),
        };

        match apply_patch(&target, Some(&root)) {
            Ok(outcome) => {
                let dependency_installed = match outcome.import_change {
                    ImportChange::Skipped => None,
                    _ => target
                        .import_source
                        .as_deref()
                        .map(|source| is_package_installed(&root, source)),
                };
                let install_hint = match (dependency_installed, &target.import_source) {
                    (Some(false), Some(source)) => Some(install_command(&root, source)),
                    _ => None,
                };
                to_json_result(&WrapTranslationResult {
                    success: true,
                    file_path: outcome.path.to_string_lossy().to_string(),
                    import_change: outcome.import_change,
                    dependency_installed,
                    install_command: install_hint,
                })
            }
            Err(err) => {
                let payload = WrapTranslationError {
                    success: false,
                    kind: err.kind(),
                    error: err.to_string(),
                };
                let json_str = serde_json::to_string_pretty(&payload).map_err(|e| {
                    McpError::internal_error(format!("JSON serialization failed: {}", e), None)
                })?;
                Ok(CallToolResult::error(vec![Content::text(json_str)]))
            }
        }
    }
}

fn to_json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("JSON serialization failed: {}", e), None)
    })?;
    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}

#[tool_handler]
impl ServerHandler for LocaleForgeMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "locale-forge MCP helps AI agents move hardcoded UI text into translation calls.\n\n\
                 Available tools:\n\
                 1. get_config - Get project configuration\n\
                 2. scan_candidates - List untranslated JSX text with suggested keys (paginated)\n\
                 3. suggest_key - Suggest a key for arbitrary text\n\
                 4. wrap_translation - Replace one literal with a translation call\n\n\
                 Recommended Workflow:\n\
                 1. Use scan_candidates to get the current candidates\n\
                 2. Review each suggestedKey, add the text to your locale bundle under that key\n\
                 3. Call wrap_translation with the candidate's file/text/line/column\n\
                 4. Rescan after editing a file: wrapping shifts the positions of later literals \
                 on the same line, and wrap_translation rejects stale positions."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Entry point for MCP server
pub fn run_server() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let service = LocaleForgeMcpServer::new();
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
