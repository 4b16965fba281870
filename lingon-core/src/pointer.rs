//! Dotted path addressing into JSON documents.
//!
//! A path such as `items[0].name` is turned into the segments
//! `items`, `0`, `name` and then into the JSON pointer `/items/0/name`.
//! Object nodes are addressed by segment text and array nodes by index, so
//! `a.0` and `a[0]` are interchangeable.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static INDEX_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(\d+)\]").unwrap());

/// Split a dotted path with bracketed indices into traversal segments.
///
/// ```
/// use lingon_core::pointer::path_segments;
///
/// assert_eq!(path_segments("a.chat[0]"), vec!["a", "chat", "0"]);
/// assert_eq!(path_segments("grid[1][2]"), vec!["grid", "1", "2"]);
/// assert!(path_segments("").is_empty());
/// ```
pub fn path_segments(path: &str) -> Vec<String> {
    if path.is_empty() {
        return Vec::new();
    }

    INDEX_PATTERN
        .replace_all(path, ".$1")
        .split('.')
        .map(str::to_string)
        .collect()
}

/// Convert a dotted path into an RFC 6901 JSON pointer.
///
/// ```
/// use lingon_core::pointer::to_json_pointer;
///
/// assert_eq!(to_json_pointer("items[0].name"), "/items/0/name");
/// assert_eq!(to_json_pointer("units.km/h"), "/units/km~1h");
/// assert_eq!(to_json_pointer(""), "");
/// ```
pub fn to_json_pointer(path: &str) -> String {
    path_segments(path)
        .iter()
        .map(|segment| format!("/{}", segment.replace('~', "~0").replace('/', "~1")))
        .collect()
}

/// Walk `document` along `path`.
///
/// Returns `None` when the document is absent or any segment has no matching
/// child. An empty path yields the document root.
pub fn resolve<'a>(document: Option<&'a Value>, path: &str) -> Option<&'a Value> {
    let root = document?;
    if path.is_empty() {
        return Some(root);
    }
    root.pointer(&to_json_pointer(path))
}

/// True for absent nodes and explicit JSON `null`.
pub(crate) fn is_missing_or_null(node: Option<&Value>) -> bool {
    node.is_none_or(Value::is_null)
}

/// Text of a resolved node: string content for strings, compact JSON for
/// everything else.
pub(crate) fn node_text(node: &Value) -> String {
    match node {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "a": {
                "chat": ["hi", "bye"],
                "0": "object key zero",
                "count": 3,
                "nothing": null
            },
            "items": [{"name": "first"}, {"name": "second"}],
            "grid": [[1, 2], [3, 4]],
            "units": {"km/h": "kilometres per hour", "a~b": "tilde"}
        })
    }

    #[test]
    fn test_resolves_array_index() {
        let doc = sample();
        assert_eq!(resolve(Some(&doc), "a.chat[0]"), Some(&json!("hi")));
        assert_eq!(resolve(Some(&doc), "a.chat[1]"), Some(&json!("bye")));
        assert_eq!(resolve(Some(&doc), "a.chat.1"), Some(&json!("bye")));
    }

    #[test]
    fn test_out_of_range_index_is_absent() {
        let doc = sample();
        assert_eq!(resolve(Some(&doc), "a.chat[5]"), None);
    }

    #[test]
    fn test_nested_indices_and_fields() {
        let doc = sample();
        assert_eq!(resolve(Some(&doc), "items[1].name"), Some(&json!("second")));
        assert_eq!(resolve(Some(&doc), "grid[1][0]"), Some(&json!(3)));
    }

    #[test]
    fn test_numeric_segment_addresses_object_key() {
        let doc = sample();
        assert_eq!(resolve(Some(&doc), "a[0]"), Some(&json!("object key zero")));
    }

    #[test]
    fn test_missing_segment_short_circuits() {
        let doc = sample();
        assert_eq!(resolve(Some(&doc), "a.missing.deeper"), None);
        assert_eq!(resolve(Some(&doc), "a.count.deeper"), None);
        assert_eq!(resolve(Some(&doc), "a.chat.first"), None);
    }

    #[test]
    fn test_empty_path_returns_root() {
        let doc = sample();
        assert_eq!(resolve(Some(&doc), ""), Some(&doc));
    }

    #[test]
    fn test_absent_document() {
        assert_eq!(resolve(None, "a.chat[0]"), None);
        assert_eq!(resolve(None, ""), None);
    }

    #[test]
    fn test_keys_with_pointer_metacharacters() {
        let doc = sample();
        assert_eq!(
            resolve(Some(&doc), "units.km/h"),
            Some(&json!("kilometres per hour"))
        );
        assert_eq!(resolve(Some(&doc), "units.a~b"), Some(&json!("tilde")));
    }

    #[test]
    fn test_explicit_null_is_missing() {
        let doc = sample();
        let node = resolve(Some(&doc), "a.nothing");
        assert_eq!(node, Some(&Value::Null));
        assert!(is_missing_or_null(node));
        assert!(is_missing_or_null(None));
        assert!(!is_missing_or_null(Some(&json!(""))));
    }

    #[test]
    fn test_node_text() {
        assert_eq!(node_text(&json!("plain")), "plain");
        assert_eq!(node_text(&json!(42)), "42");
        assert_eq!(node_text(&json!(true)), "true");
        assert_eq!(node_text(&json!({"k": [1, 2]})), r#"{"k":[1,2]}"#);
    }
}
