//! CodeMod patcher.
//!
//! Wraps exactly one literal in a translation call:
//!
//! 1. **Load**: resolve and read the file, parse it with the scanner's grammar
//! 2. **Locate**: find the node at the requested position whose trimmed text
//!    matches ([`locate::locate`]); nothing found means the file drifted
//! 3. **Build**: render the call from the dotted function name and the key
//! 4. **Imports**: optionally make sure the function is imported
//! 5. **Emit**: splice the edits into the original text and replace the file
//!
//! Steps 1-4 never touch the disk, so every failure before the write leaves
//! the file as it was. Two patches on the same file must not run concurrently.

pub mod call;
pub mod dependency;
pub mod edit;
pub mod error;
pub mod imports;
pub mod locate;

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use call::CallTarget;
pub use dependency::{install_command, is_package_installed};
pub use edit::{TextEdit, apply_edits};
pub use error::{CodemodError, CodemodErrorKind};
pub use imports::{ImportBinding, ImportChange, ImportKind, plan_import};
pub use locate::{LiteralShape, Located, Placement, locate};

use crate::core::parsers::{new_source_map, parse_source};

/// A request to wrap one previously scanned literal.
///
/// `file_path`, `text`, `line` and `column` repeat a candidate's locator.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslationTarget {
    /// Absolute path, or relative to the project root.
    pub file_path: String,
    pub text: String,
    /// 1-based line.
    pub line: usize,
    /// 0-based column.
    pub column: usize,
    /// Localization key passed to the call.
    pub key: String,
    /// Dotted call path such as `t` or `intl.formatMessage`.
    #[serde(default = "default_function_name")]
    pub function_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_source: Option<String>,
    #[serde(default)]
    pub import_kind: ImportKind,
    #[serde(default)]
    pub skip_import: bool,
}

fn default_function_name() -> String {
    "t".to_string()
}

impl TranslationTarget {
    /// The import to guarantee, if import management applies.
    pub fn import_binding(&self, call: &CallTarget) -> Option<ImportBinding> {
        if self.skip_import {
            return None;
        }
        let source = self.import_source.as_deref().map(str::trim)?;
        if source.is_empty() {
            return None;
        }
        Some(ImportBinding::new(source, call.symbol(), self.import_kind))
    }

    /// Check the request before any file access.
    fn validate(&self) -> Result<CallTarget, CodemodError> {
        if self.file_path.trim().is_empty() {
            return Err(CodemodError::invalid_input("file path is required"));
        }
        if self.key.trim().is_empty() {
            return Err(CodemodError::invalid_input("translation key is required"));
        }
        if self.function_name.trim().is_empty() {
            return Err(CodemodError::invalid_input(
                "translation function name is required",
            ));
        }
        if self.text.trim().is_empty() {
            return Err(CodemodError::invalid_input("target text is required"));
        }
        if self.line == 0 {
            return Err(CodemodError::invalid_input("line numbers start at 1"));
        }
        CallTarget::parse(&self.function_name)
    }
}

/// Source text after a successful patch.
#[derive(Debug, Clone)]
pub struct PatchedSource {
    pub code: String,
    pub located: Located,
    pub import_change: ImportChange,
}

/// Result of [`apply_patch`].
#[derive(Debug, Clone)]
pub struct PatchOutcome {
    /// The file that was rewritten.
    pub path: PathBuf,
    pub import_change: ImportChange,
}

/// Patch `code` in memory. `file_path` selects the grammar and names the file
/// in errors.
pub fn patch_source(
    code: String,
    file_path: &str,
    target: &TranslationTarget,
) -> Result<PatchedSource, CodemodError> {
    let call = target.validate()?;
    let parsed = parse_source(code, file_path, new_source_map())?;

    let located = locate(&parsed, &target.text, target.line, target.column).ok_or_else(|| {
        CodemodError::StaleLocation {
            file: file_path.to_string(),
            text: target.text.trim().to_string(),
            line: target.line,
            column: target.column,
        }
    })?;

    let replacement = located.placement.wrap(&call.render(target.key.trim()));
    let mut edits = vec![TextEdit::replace(parsed.range(located.span), replacement)];

    let import_change = match target.import_binding(&call) {
        Some(binding) => {
            let (change, edit) = plan_import(&parsed, &binding);
            edits.extend(edit);
            change
        }
        None => ImportChange::Skipped,
    };

    Ok(PatchedSource {
        code: parsed.restore_bom(apply_edits(&parsed.code, edits)),
        located,
        import_change,
    })
}

/// Resolve a target path against the project root.
pub fn resolve_target_path(file_path: &str, project_root: Option<&Path>) -> PathBuf {
    let path = Path::new(file_path);
    match project_root {
        Some(root) if path.is_relative() => root.join(path),
        _ => path.to_path_buf(),
    }
}

/// Wrap the literal described by `target` and write the file back.
///
/// Relative `file_path`s resolve against `project_root`.
pub fn apply_patch(
    target: &TranslationTarget,
    project_root: Option<&Path>,
) -> Result<PatchOutcome, CodemodError> {
    target.validate()?;

    let path = resolve_target_path(&target.file_path, project_root);
    let code = fs::read_to_string(&path).map_err(|e| CodemodError::io(&path, e))?;

    let patched = patch_source(code, &target.file_path, target)?;

    write_replacing(&path, &patched.code).map_err(|e| CodemodError::io(&path, e))?;

    Ok(PatchOutcome {
        path,
        import_change: patched.import_change,
    })
}

/// Write to a sibling temp file, then rename it over `path`, so readers see
/// either the old or the new content. Symlinks are resolved first so the file
/// they point at is the one replaced.
fn write_replacing(path: &Path, contents: &str) -> io::Result<()> {
    let path = fs::canonicalize(path)?;
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
    let temp_path = path.with_file_name(format!(
        ".{}.locale-forge-tmp",
        file_name.to_string_lossy()
    ));
    let permissions = fs::metadata(&path)?.permissions();

    fs::write(&temp_path, contents)?;
    fs::set_permissions(&temp_path, permissions)
        .and_then(|()| fs::rename(&temp_path, &path))
        .inspect_err(|_| {
            let _ = fs::remove_file(&temp_path);
        })
}
