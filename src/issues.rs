//! Reportable findings of a scan.
//!
//! Each finding carries everything the CLI reporter needs to print it. The
//! scanner itself only produces [`SourceCandidate`]s and [`FileFailure`]s; this
//! module turns them into something a person reads.

use enum_dispatch::enum_dispatch;

use crate::core::scan::{FileFailure, FileFailureKind, SourceCandidate};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    UntranslatedText,
    ParseError,
    ReadError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::UntranslatedText => write!(f, "untranslated-text"),
            Rule::ParseError => write!(f, "parse-error"),
            Rule::ReadError => write!(f, "read-error"),
        }
    }
}

// ============================================================
// Source Context
// ============================================================

/// Where a finding sits in a source file, plus the line to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContext {
    pub file_path: String,
    /// 1-based line.
    pub line: usize,
    /// 1-based column, as printed after the path.
    pub col: usize,
    /// Line shown under the location (trimmed).
    pub source_line: String,
    /// Character offset of the caret inside `source_line`.
    pub caret_offset: usize,
}

impl SourceContext {
    pub fn from_candidate(candidate: &SourceCandidate) -> Self {
        // The stored context line is trimmed, so the candidate column does not
        // index into it; point the caret at the text itself instead.
        let caret_offset = candidate
            .context
            .find(&candidate.text)
            .map(|byte_idx| candidate.context[..byte_idx].chars().count())
            .unwrap_or(0);

        Self {
            file_path: candidate.file.clone(),
            line: candidate.line,
            col: candidate.column + 1,
            source_line: candidate.context.clone(),
            caret_offset,
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// JSX text that is not wrapped in a translation call yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UntranslatedTextIssue {
    pub context: SourceContext,
    pub text: String,
    pub suggested_key: String,
    /// Ready-to-run `wrap` command for this occurrence.
    pub wrap_hint: String,
}

impl UntranslatedTextIssue {
    pub fn new(candidate: &SourceCandidate, fallback_namespace: &str) -> Self {
        let suggested_key = candidate.suggested_key(fallback_namespace);
        let wrap_hint = format!(
            "locale-forge wrap {} --line {} --column {} --text {} --key {}",
            candidate.file,
            candidate.line,
            candidate.column,
            serde_json::Value::String(candidate.text.clone()),
            suggested_key
        );

        Self {
            context: SourceContext::from_candidate(candidate),
            text: candidate.text.clone(),
            suggested_key,
            wrap_hint,
        }
    }

    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::UntranslatedText
    }
}

/// A file the scanner skipped because it could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailureIssue {
    pub file_path: String,
    pub kind: FileFailureKind,
    pub error: String,
}

impl From<&FileFailure> for FileFailureIssue {
    fn from(failure: &FileFailure) -> Self {
        Self {
            file_path: failure.file.clone(),
            kind: failure.kind,
            error: failure.error.clone(),
        }
    }
}

impl FileFailureIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }
}

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    UntranslatedText(UntranslatedTextIssue),
    FileFailure(FileFailureIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::UntranslatedText(_) => UntranslatedTextIssue::severity(),
            Issue::FileFailure(_) => FileFailureIssue::severity(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Source code location with a line to display.
    Source(&'a SourceContext),
    /// File-level only, no line context.
    File { path: &'a str },
}

/// Trait for types that can be reported to CLI.
///
/// Implemented by all issue types and dispatched on [`Issue`] with
/// `enum_dispatch`.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message (the text, or the failure message).
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

impl Report for UntranslatedTextIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.text.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        Some(&self.wrap_hint)
    }

    fn details(&self) -> Option<String> {
        Some(format!("suggested key: {}", self.suggested_key))
    }
}

impl Report for FileFailureIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        match self.kind {
            FileFailureKind::Read => "could not read file".to_string(),
            FileFailureKind::Parse => "could not parse file".to_string(),
        }
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        match self.kind {
            FileFailureKind::Read => Rule::ReadError,
            FileFailureKind::Parse => Rule::ParseError,
        }
    }

    fn details(&self) -> Option<String> {
        Some(self.error.clone())
    }
}
