use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::core::{
    FileFailure, ReviewCandidate,
    codemod::{CodemodErrorKind, ImportChange, ImportKind},
};

// ============================================================
// Parameters
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetConfigParams {
    /// Absolute path of the project root
    pub project_root_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanCandidatesParams {
    /// Absolute path of the project root
    pub project_root_path: String,
    /// Also return calls that already go through a translation function
    #[serde(default)]
    pub include_localized: Option<bool>,
    /// Page size (default 20, max 100)
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuggestKeyParams {
    pub text: String,
    /// Namespace for the key; takes priority over `file`
    #[serde(default)]
    pub namespace: Option<String>,
    /// File the text lives in; its name becomes the namespace
    #[serde(default)]
    pub file: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WrapTranslationParams {
    /// Absolute path of the project root
    pub project_root_path: String,
    /// File of the candidate, as returned by scan_candidates
    pub file_path: String,
    /// Candidate text, as returned by scan_candidates
    pub text: String,
    /// Candidate line (1-based)
    pub line: usize,
    /// Candidate column (0-based)
    pub column: usize,
    /// Key to pass to the translation function
    pub key: String,
    /// Defaults to the configured function name
    #[serde(default)]
    pub function_name: Option<String>,
    /// Defaults to the configured import source
    #[serde(default)]
    pub import_source: Option<String>,
    #[serde(default)]
    pub import_kind: Option<ImportKind>,
    #[serde(default)]
    pub skip_import: Option<bool>,
}

// ============================================================
// Config Types (get_config)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDto {
    /// True if config was loaded from a file, false if using defaults
    pub from_file: bool,
    pub config: ConfigValues,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigValues {
    pub extensions: Vec<String>,
    pub ignores: Vec<String>,
    pub includes: Vec<String>,
    pub translation_functions: Vec<String>,
    pub namespace: String,
    pub function_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import_source: Option<String>,
    pub import_kind: ImportKind,
    pub skip_import: bool,
}

impl From<Config> for ConfigValues {
    fn from(c: Config) -> Self {
        Self {
            extensions: c.normalized_extensions(),
            ignores: c.ignores,
            includes: c.includes,
            translation_functions: c.translation_functions,
            namespace: c.namespace,
            function_name: c.function_name,
            import_source: c.import_source,
            import_kind: c.import_kind,
            skip_import: c.skip_import,
        }
    }
}

// ============================================================
// Scan Types (scan_candidates)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidateScanResult {
    pub files_scanned: usize,
    pub plain_count: usize,
    pub localized_count: usize,
    /// Items across all pages
    pub total_count: usize,
    pub total_file_count: usize,
    pub items: Vec<ReviewCandidate>,
    pub failures: Vec<FileFailure>,
    pub pagination: Pagination,
}

// ============================================================
// Key Suggestion Types (suggest_key)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuggestKeyResult {
    pub key: String,
    pub namespace: String,
}

// ============================================================
// Wrap Types (wrap_translation)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WrapTranslationResult {
    pub success: bool,
    /// File that was rewritten
    pub file_path: String,
    pub import_change: ImportChange,
    /// Whether the import source is installed under node_modules.
    /// Absent when no import was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependency_installed: Option<bool>,
    /// Package manager command that installs the missing import source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_command: Option<String>,
}

/// Payload of a failed wrap_translation call
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WrapTranslationError {
    pub success: bool,
    pub kind: CodemodErrorKind,
    pub error: String,
}

// ============================================================
// Common Types
// ============================================================

/// Pagination information
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}
