//! In-memory locale bundle helpers.
//!
//! A bundle is a JSON object whose leaves are strings. Keys produced by the
//! scanner and the key suggestion engine are dotted paths into such an object.
//! Reading and writing bundle files belongs to the caller.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

/// Action taken on a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Added,
    Updated,
}

/// Insert `value` at the dotted `key` path, creating intermediate objects.
///
/// Key format: "Navigation.signOut" or "HomePage.cta.startNow".
/// An existing leaf at the path is overwritten, and a non-object value sitting
/// where an intermediate object is needed is replaced by an object.
pub fn nest_key(key: &str, value: &str, target: &mut Map<String, Value>) -> KeyAction {
    let parts: Vec<&str> = key.split('.').collect();
    insert_nested(target, &parts, Value::String(value.to_string()))
}

fn insert_nested(root: &mut Map<String, Value>, path: &[&str], value: Value) -> KeyAction {
    let Some((first, rest)) = path.split_first() else {
        return KeyAction::Added;
    };

    if rest.is_empty() {
        let action = if root.contains_key(*first) {
            KeyAction::Updated
        } else {
            KeyAction::Added
        };
        root.insert(first.to_string(), value);
        return action;
    }

    let next_level = root
        .entry(first.to_string())
        .or_insert_with(|| Value::Object(Map::new()));

    if !next_level.is_object() {
        *next_level = Value::Object(Map::new());
    }

    match next_level {
        Value::Object(inner) => insert_nested(inner, rest, value),
        _ => KeyAction::Added,
    }
}

/// Collect the dot-notated paths of every non-object leaf in a bundle.
pub fn flatten_keys(bundle: &Map<String, Value>) -> BTreeSet<String> {
    let mut keys = BTreeSet::new();
    collect_keys(bundle, "", &mut keys);
    keys
}

fn collect_keys(map: &Map<String, Value>, prefix: &str, keys: &mut BTreeSet<String>) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Value::Object(inner) => collect_keys(inner, &path, keys),
            _ => {
                keys.insert(path);
            }
        }
    }
}
