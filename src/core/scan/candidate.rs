use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::core::keygen::{namespace_from_file, suggest_key};

/// A detected string occurrence.
///
/// Created fresh on every scan and never mutated afterwards. `file`, `line`,
/// `column` and `text` together form the locator a patch request must repeat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SourceCandidate {
    /// Stable identity, see [`candidate_id`].
    pub id: String,
    /// Trimmed literal content.
    pub text: String,
    /// Path relative to the scan root, `/`-separated.
    pub file: String,
    /// 1-based line.
    pub line: usize,
    /// 0-based column.
    pub column: usize,
    /// Trimmed source line containing the literal. For human review only.
    pub context: String,
    /// True when found as the argument of a recognized translation call.
    pub localized: bool,
    /// The key already in use, for localized candidates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_path: Option<String>,
}

impl SourceCandidate {
    /// A bare JSX text occurrence that still needs translating.
    pub fn plain(text: &str, file: &str, line: usize, column: usize, context: &str) -> Self {
        Self::build(text, file, line, column, context, None)
    }

    /// A call site that already goes through a translation function.
    pub fn localized(key: &str, file: &str, line: usize, column: usize, context: &str) -> Self {
        Self::build(key, file, line, column, context, Some(key.trim().to_string()))
    }

    fn build(
        text: &str,
        file: &str,
        line: usize,
        column: usize,
        context: &str,
        key_path: Option<String>,
    ) -> Self {
        let text = text.trim().to_string();
        let localized = key_path.is_some();
        Self {
            id: candidate_id(&text, file, line, column, localized),
            text,
            file: file.to_string(),
            line,
            column,
            context: context.trim().to_string(),
            localized,
            key_path,
        }
    }

    /// Key suggestion for this candidate, namespaced by its file name.
    pub fn suggested_key(&self, fallback_namespace: &str) -> String {
        suggest_key(&self.text, &namespace_from_file(&self.file, fallback_namespace))
    }
}

/// A candidate as handed to reviewers: plain candidates carry the key the
/// suggestion engine proposes for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCandidate {
    #[serde(flatten)]
    pub candidate: SourceCandidate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_key: Option<String>,
}

impl ReviewCandidate {
    pub fn new(candidate: SourceCandidate, fallback_namespace: &str) -> Self {
        let suggested_key =
            (!candidate.localized).then(|| candidate.suggested_key(fallback_namespace));
        Self {
            candidate,
            suggested_key,
        }
    }
}

/// Identity of a candidate.
///
/// Hex of the first 128 bits of SHA-256 over
/// `"{text}-{file}-{line}-{column}-{localized|plain}"`.
pub fn candidate_id(text: &str, file: &str, line: usize, column: usize, localized: bool) -> String {
    let tag = if localized { "localized" } else { "plain" };
    let digest = Sha256::digest(format!("{}-{}-{}-{}-{}", text, file, line, column, tag));
    hex::encode(&digest[..16])
}
