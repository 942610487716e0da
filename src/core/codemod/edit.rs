use std::ops::Range;

/// Replacement of a byte range of the source text.
///
/// Only the edited ranges change; every other byte of the file is kept as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: Range<usize>,
    pub replacement: String,
}

impl TextEdit {
    pub fn replace(range: Range<usize>, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }

    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::replace(at..at, text)
    }
}

/// Apply non-overlapping edits to `source`.
///
/// Edits are applied back to front so earlier offsets stay valid. When an
/// insertion and a replacement start at the same offset, the inserted text
/// ends up before the replacement.
pub fn apply_edits(source: &str, mut edits: Vec<TextEdit>) -> String {
    edits.sort_by(|a, b| {
        b.range
            .start
            .cmp(&a.range.start)
            .then(b.range.end.cmp(&a.range.end))
    });

    let mut output = source.to_string();
    for edit in edits {
        output.replace_range(edit.range, &edit.replacement);
    }
    output
}
