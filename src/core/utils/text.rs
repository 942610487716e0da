//! Text helpers shared across the core engine.

/// Byte lengths of the leading and trailing runs of raw JSX text that decode
/// to whitespace.
///
/// Character references count as well as literal whitespace, so `&nbsp;Hi`
/// has a 6-byte leading margin. The content between the margins is what
/// trimming the decoded text leaves.
///
/// # Examples
///
/// ```
/// use locale_forge::core::utils::jsx_text_margins;
///
/// assert_eq!(jsx_text_margins("\n  Hello  "), (3, 2));
/// assert_eq!(jsx_text_margins("&nbsp;Hello&#160;"), (6, 6));
/// assert_eq!(jsx_text_margins("&amp;Hello"), (0, 0));
/// ```
pub fn jsx_text_margins(raw: &str) -> (usize, usize) {
    let mut start = 0;
    while start < raw.len() {
        let rest = &raw[start..];
        match whitespace_prefix_len(rest) {
            Some(len) => start += len,
            None => break,
        }
    }

    let mut end = raw.len();
    while end > start {
        let rest = &raw[start..end];
        match whitespace_suffix_len(rest) {
            Some(len) => end -= len,
            None => break,
        }
    }

    (start, raw.len() - end)
}

fn whitespace_prefix_len(text: &str) -> Option<usize> {
    let first = text.chars().next()?;
    if first.is_whitespace() {
        return Some(first.len_utf8());
    }
    match decode_reference(text) {
        Some((ch, len)) if ch.is_whitespace() => Some(len),
        _ => None,
    }
}

fn whitespace_suffix_len(text: &str) -> Option<usize> {
    let last = text.chars().next_back()?;
    if last.is_whitespace() {
        return Some(last.len_utf8());
    }
    if last != ';' {
        return None;
    }
    let amp = text.rfind('&')?;
    match decode_reference(&text[amp..]) {
        Some((ch, len)) if ch.is_whitespace() && amp + len == text.len() => Some(len),
        _ => None,
    }
}

/// Decode a character reference (`&nbsp;`, `&#160;`, `&#xA0;`) at the start
/// of `text`, returning the character and the reference's byte length.
/// Only the named references that decode to whitespace are recognized.
fn decode_reference(text: &str) -> Option<(char, usize)> {
    let body = text.strip_prefix('&')?;
    let end = body.get(..12).unwrap_or(body).find(';')?;
    let name = &body[..end];

    let ch = match name.strip_prefix('#') {
        Some(number) => {
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)?
        }
        None => match name {
            "nbsp" => '\u{a0}',
            "ensp" => '\u{2002}',
            "emsp" => '\u{2003}',
            "thinsp" => '\u{2009}',
            _ => return None,
        },
    };
    Some((ch, end + 2))
}

/// Normalize a path-like string to forward slashes.
pub fn to_forward_slashes(path: &str) -> String {
    path.replace('\\', "/")
}

/// Checks whether `name` is a valid ECMAScript identifier (ASCII subset plus
/// any Unicode alphanumeric character).
///
/// # Examples
///
/// ```
/// use locale_forge::core::utils::is_identifier;
///
/// assert!(is_identifier("t"));
/// assert!(is_identifier("$intl"));
/// assert!(is_identifier("_formatMessage2"));
/// assert!(!is_identifier("2fast"));
/// assert!(!is_identifier("format-message"));
/// assert!(!is_identifier(""));
/// ```
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let is_start = |c: char| c == '_' || c == '$' || c.is_alphabetic();
    is_start(first) && chars.all(|c| is_start(c) || c.is_alphanumeric())
}
