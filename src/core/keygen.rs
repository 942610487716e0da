//! Key suggestion engine.
//!
//! Maps free text (and the file it was found in) to a stable, dotted
//! localization key such as `signup_form.create_your_account`. Everything here
//! is pure: no I/O, no failure modes.

use std::sync::LazyLock;
use std::time::{SystemTime, UNIX_EPOCH};

use regex::Regex;
use sha2::{Digest, Sha256};

/// Namespace used when the caller does not provide one.
pub const DEFAULT_NAMESPACE: &str = "strings";

/// Maximum number of words kept in a slug.
pub const MAX_SLUG_WORDS: usize = 6;

/// Maximum length of the slug part of a key (everything after the namespace).
pub const MAX_SLUG_LEN: usize = 64;

/// Length of the base-36 disambiguation suffix.
pub const HASH_SUFFIX_LEN: usize = 4;

static NON_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9\s]").unwrap());

/// Suggest a key for `text` inside `namespace`.
///
/// When the text has no alphanumeric characters at all, the key falls back to
/// `{namespace}.text_{unix_millis}`.
///
/// # Examples
///
/// ```
/// use locale_forge::core::keygen::suggest_key;
///
/// assert_eq!(suggest_key("Hello World!", "strings"), "strings.hello_world");
/// assert_eq!(suggest_key("  Save   changes ", "settings"), "settings.save_changes");
/// ```
pub fn suggest_key(text: &str, namespace: &str) -> String {
    suggest_key_at(text, namespace, unix_millis())
}

/// [`suggest_key`] with an explicit timestamp for the empty-slug fallback.
pub fn suggest_key_at(text: &str, namespace: &str, unix_millis: u128) -> String {
    let cleaned = NON_SLUG_CHARS.replace_all(text, "");
    let words: Vec<String> = cleaned.split_whitespace().map(str::to_lowercase).collect();

    if words.is_empty() {
        return format!("{}.text_{}", namespace, unix_millis);
    }

    let kept = words.len().min(MAX_SLUG_WORDS);
    let mut slug = words[..kept].join("_");
    let needs_hash = words.len() > MAX_SLUG_WORDS || slug.len() > MAX_SLUG_LEN;

    if needs_hash {
        truncate_slug(&mut slug, MAX_SLUG_LEN - HASH_SUFFIX_LEN - 1);
        slug = format!("{}_{}", slug, short_hash(text));
    }

    format!("{}.{}", namespace, slug)
}

/// Derive a namespace from the final segment of a file path.
///
/// The extension is dropped and the remaining name is slugified, splitting
/// camelCase/PascalCase humps: `components/forms/SignupForm.tsx` becomes
/// `signup_form`. Returns `fallback` when nothing usable remains.
pub fn namespace_from_file(path: &str, fallback: &str) -> String {
    let file_name = path.rsplit(['/', '\\']).next().unwrap_or_default();
    let stem = match file_name.rfind('.') {
        Some(idx) if idx > 0 => &file_name[..idx],
        _ => file_name,
    };

    let slug = slugify(stem);
    if slug.is_empty() {
        fallback.to_string()
    } else {
        slug
    }
}

/// Lowercase, underscore-joined slug of the alphanumeric words in `text`.
///
/// Non-alphanumeric characters separate words, and case humps start a new word
/// (`HTMLParser` → `html_parser`, `signupForm2` → `signup_form2`).
pub fn slugify(text: &str) -> String {
    let mut words = Vec::new();
    for run in text.split(|c: char| !c.is_ascii_alphanumeric()) {
        split_case_humps(run, &mut words);
    }
    words.join("_")
}

fn split_case_humps(run: &str, words: &mut Vec<String>) {
    let chars: Vec<char> = run.chars().collect();
    let mut current = String::new();

    for (i, &ch) in chars.iter().enumerate() {
        if i > 0 && ch.is_ascii_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_ascii_lowercase());
            let boundary = prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower);
            if boundary && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(ch.to_ascii_lowercase());
    }

    if !current.is_empty() {
        words.push(current);
    }
}

/// Cut an ASCII slug to at most `max_len` bytes without leaving a dangling `_`.
fn truncate_slug(slug: &mut String, max_len: usize) {
    if slug.len() > max_len {
        slug.truncate(max_len);
    }
    while slug.ends_with('_') {
        slug.pop();
    }
}

/// Four base-36 characters derived from the SHA-256 of `text`.
fn short_hash(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    let mut value = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    value %= 36u32.pow(HASH_SUFFIX_LEN as u32);

    let mut out = vec![b'0'; HASH_SUFFIX_LEN];
    for slot in out.iter_mut().rev() {
        let digit = (value % 36) as u8;
        *slot = if digit < 10 {
            b'0' + digit
        } else {
            b'a' + digit - 10
        };
        value /= 36;
    }
    String::from_utf8(out).unwrap_or_default()
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}
