use glob::{MatchOptions, Pattern, PatternError};

/// Expand brace alternatives in a glob pattern.
///
/// The `glob` crate has no `{a,b}` support, so patterns are expanded into every
/// alternative before compiling. Nested lists are expanded recursively.
///
/// Examples:
/// - `**/*.{ts,tsx}` expands to `**/*.ts`, `**/*.tsx`
/// - `{src,app}/{a,b}` expands to four patterns
/// - a pattern without braces (or with an unbalanced `{`) is returned as-is
pub fn expand_braces(pattern: &str) -> Vec<String> {
    let Some((open, close)) = find_brace_group(pattern) else {
        return vec![pattern.to_string()];
    };

    let prefix = &pattern[..open];
    let body = &pattern[open + 1..close];
    let suffix = &pattern[close + 1..];

    split_alternatives(body)
        .into_iter()
        .flat_map(|alt| expand_braces(&format!("{}{}{}", prefix, alt, suffix)))
        .collect()
}

/// Find the first top-level `{...}` group, returning byte offsets of the braces.
fn find_brace_group(pattern: &str) -> Option<(usize, usize)> {
    let open = pattern.find('{')?;
    let mut depth = 0usize;
    for (idx, ch) in pattern[open..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some((open, open + idx));
                }
            }
            _ => {}
        }
    }
    None
}

/// Split a brace body on commas that are not nested inside another group.
fn split_alternatives(body: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, ch) in body.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&body[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(&body[start..]);
    parts
}

/// A set of compiled glob patterns matched against `/`-separated relative paths.
#[derive(Debug, Clone, Default)]
pub struct GlobSet {
    patterns: Vec<Pattern>,
}

impl GlobSet {
    /// Compile the given patterns, expanding brace lists first.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, PatternError> {
        let mut compiled = Vec::new();
        for pattern in patterns {
            for expanded in expand_braces(pattern.as_ref()) {
                compiled.push(Pattern::new(&expanded)?);
            }
        }
        Ok(Self { patterns: compiled })
    }

    /// Append every pattern of `other`.
    pub fn extend(&mut self, other: GlobSet) {
        self.patterns.extend(other.patterns);
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// `*` does not cross `/`, while `**` spans any number of directories.
    pub fn is_match(&self, relative_path: &str) -> bool {
        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };
        self.patterns
            .iter()
            .any(|p| p.matches_with(relative_path, options))
    }
}
