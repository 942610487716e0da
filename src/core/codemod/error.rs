use std::{io, path::PathBuf};

use schemars::JsonSchema;
use serde::Serialize;
use thiserror::Error;

use crate::core::parsers::SourceParseError;

/// Failure of a single patch operation.
///
/// Everything except [`CodemodError::Io`] is raised before the file is written,
/// so a failed patch never leaves a partially edited file behind.
#[derive(Debug, Error)]
pub enum CodemodError {
    /// A required field of the patch request is missing or empty
    #[error("Invalid patch request: {0}")]
    InvalidInput(String),

    /// The translation function name is not a dotted identifier path
    #[error("Invalid translation function name \"{0}\": expected an identifier such as `t` or `intl.formatMessage`")]
    InvalidFunctionName(String),

    /// No node matches the requested text at the requested position
    #[error("No string \"{text}\" found at {file}:{line}:{column}.\n\nTip: The file changed since it was scanned; scan again to refresh positions")]
    StaleLocation {
        file: String,
        text: String,
        line: usize,
        column: usize,
    },

    /// The target file does not parse
    #[error("Failed to parse {0}")]
    Parse(#[from] SourceParseError),

    /// Reading or writing the target file failed
    #[error("{}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Tag of a [`CodemodError`], for callers that branch on the failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum CodemodErrorKind {
    InvalidInput,
    InvalidFunctionName,
    StaleLocation,
    Parse,
    Io,
}

impl CodemodError {
    pub fn kind(&self) -> CodemodErrorKind {
        match self {
            Self::InvalidInput(_) => CodemodErrorKind::InvalidInput,
            Self::InvalidFunctionName(_) => CodemodErrorKind::InvalidFunctionName,
            Self::StaleLocation { .. } => CodemodErrorKind::StaleLocation,
            Self::Parse(_) => CodemodErrorKind::Parse,
            Self::Io { .. } => CodemodErrorKind::Io,
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl CodemodErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInput => "invalidInput",
            Self::InvalidFunctionName => "invalidFunctionName",
            Self::StaleLocation => "staleLocation",
            Self::Parse => "parse",
            Self::Io => "io",
        }
    }
}
