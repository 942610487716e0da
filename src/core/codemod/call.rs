use serde_json::Value;

use crate::core::codemod::CodemodError;
use crate::core::utils::is_identifier;

/// The translation function a literal gets wrapped in.
///
/// `intl.formatMessage` becomes the callee `intl` with one member access, so
/// the rendered call is `intl.formatMessage("key")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallTarget {
    segments: Vec<String>,
}

impl CallTarget {
    pub fn parse(function_name: &str) -> Result<Self, CodemodError> {
        let segments: Vec<String> = function_name
            .split('.')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if segments.is_empty() || !segments.iter().all(|s| is_identifier(s)) {
            return Err(CodemodError::InvalidFunctionName(function_name.to_string()));
        }
        Ok(Self { segments })
    }

    /// The identifier that has to be in scope: `intl` for `intl.formatMessage`.
    pub fn symbol(&self) -> &str {
        &self.segments[0]
    }

    pub fn callee(&self) -> String {
        self.segments.join(".")
    }

    /// Call expression source with `key` as its only argument.
    pub fn render(&self, key: &str) -> String {
        let literal = Value::String(key.to_string()).to_string();
        format!("{}({})", self.callee(), literal)
    }
}
