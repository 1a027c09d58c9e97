//! Path codec: canonical path strings to and from key/index segments.
//!
//! The root is the empty string. A mapping child appends
//! `.key` (no dot before the first segment) and a sequence child appends
//! `[index]`, so `a.c[0]` is item 0 of key `c` of key `a`.
//!
//! Keys that themselves contain `.`, `[` or `]` (or are empty) do not survive
//! a round trip; there is no escaping scheme. `$` is an ordinary key inside
//! the codec; only typed input goes through [`from_input`], which reads a
//! leading `$` as the root.

use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::OnceLock;

/// Root as typed by the user and as displayed.
pub const ROOT_MARKER: &str = "$";

/// One step of a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => f.write_str(key),
            Segment::Index(i) => write!(f, "[{}]", i),
        }
    }
}

pub fn is_root(path: &str) -> bool {
    path.is_empty()
}

/// Codec path for a path typed at a prompt or on the command line.
///
/// `$` alone is the root and a leading `$.` or `$[` is dropped, so JSONPath
/// style input resolves. A top-level key named `$` is reached as `$.$`.
pub fn from_input(input: &str) -> &str {
    let input = input.trim();
    match input.strip_prefix(ROOT_MARKER) {
        Some("") => "",
        Some(rest) if rest.starts_with('[') => rest,
        Some(rest) if rest.starts_with('.') => &rest[1..],
        _ => input,
    }
}

/// Display form of a path: the root marker for root, the path itself otherwise.
pub fn display(path: &str) -> &str {
    if is_root(path) { ROOT_MARKER } else { path }
}

/// Path of child `key` under `parent`.
pub fn encode(parent: &str, key: &str, parent_is_sequence: bool) -> String {
    if parent_is_sequence {
        format!("{}[{}]", parent, key)
    } else if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

/// Append one segment to `parent`.
pub fn push(parent: &str, segment: &Segment) -> String {
    match segment {
        Segment::Key(key) => encode(parent, key, false),
        Segment::Index(i) => encode(parent, &i.to_string(), true),
    }
}

/// Encode a whole segment list.
pub fn join(segments: &[Segment]) -> String {
    segments
        .iter()
        .fold(String::new(), |path, segment| push(&path, segment))
}

/// Split a path into segments. Root decodes to an empty list.
pub fn decode(path: &str) -> Vec<Segment> {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    let token = TOKEN.get_or_init(|| Regex::new(r"\[(\d+)\]|[^.\[\]]+").unwrap());

    if is_root(path) {
        return Vec::new();
    }

    token
        .captures_iter(path)
        .map(|caps| match caps.get(1) {
            Some(digits) => digits
                .as_str()
                .parse::<usize>()
                .map(Segment::Index)
                .unwrap_or_else(|_| Segment::Key(digits.as_str().to_string())),
            None => Segment::Key(caps[0].to_string()),
        })
        .collect()
}

/// Walk `root` along `path`. `None` if any step is missing or lands on a scalar.
pub fn resolve<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    decode(path)
        .iter()
        .try_fold(root, |value, segment| step(value, segment))
}

fn step<'a>(value: &'a Value, segment: &Segment) -> Option<&'a Value> {
    match (value, segment) {
        (Value::Array(items), Segment::Index(i)) => items.get(*i),
        (Value::Object(map), Segment::Index(i)) => map.get(&i.to_string()),
        (Value::Object(map), Segment::Key(key)) => map.get(key),
        (Value::Array(items), Segment::Key(key)) if is_decimal(key) => {
            key.parse::<usize>().ok().and_then(|i| items.get(i))
        }
        _ => None,
    }
}

/// Re-encode `path` by the containers it actually walks through, so `list.1`
/// and `list.1` become `list[1]`. `None` if it does not resolve.
pub fn canonicalize(root: &Value, path: &str) -> Option<String> {
    let mut value = root;
    let mut canonical = String::new();
    for segment in decode(path) {
        let next = step(value, &segment)?;
        canonical = match (value, &segment) {
            (Value::Array(_), Segment::Index(i)) => encode(&canonical, &i.to_string(), true),
            (Value::Array(_), Segment::Key(key)) => {
                encode(&canonical, &key.parse::<usize>().ok()?.to_string(), true)
            }
            (_, segment) => encode(&canonical, &segment_key(segment), false),
        };
        value = next;
    }
    Some(canonical)
}

fn segment_key(segment: &Segment) -> String {
    match segment {
        Segment::Key(key) => key.clone(),
        Segment::Index(i) => i.to_string(),
    }
}

fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parent path, or `None` for root.
pub fn parent(path: &str) -> Option<String> {
    let mut segments = decode(path);
    segments.pop()?;
    Some(join(&segments))
}

/// Ancestor chain: root first, immediate parent last. Empty for root.
pub fn ancestors(path: &str) -> Vec<String> {
    let segments = decode(path);
    (0..segments.len()).map(|n| join(&segments[..n])).collect()
}

/// Number of segments (root is depth 0).
pub fn depth(path: &str) -> usize {
    decode(path).len()
}

pub fn last_segment(path: &str) -> Option<Segment> {
    decode(path).pop()
}

/// Whether `ancestor` is a strict ancestor of `path`.
pub fn is_ancestor(ancestor: &str, path: &str) -> bool {
    let outer = decode(ancestor);
    let inner = decode(path);
    outer.len() < inner.len() && inner.starts_with(&outer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encode() {
        assert_eq!(encode("", "a", false), "a");
        assert_eq!(encode("$", "a", false), "$.a");
        assert_eq!(encode("a", "b", false), "a.b");
        assert_eq!(encode("a.c", "0", true), "a.c[0]");
        assert_eq!(encode("", "3", true), "[3]");
        assert_eq!(encode("[3]", "x", false), "[3].x");
    }

    #[test]
    fn test_decode() {
        assert!(decode("").is_empty());
        assert_eq!(decode("$"), vec![Segment::Key("$".into())]);
        assert_eq!(
            decode("a.c[0]"),
            vec![
                Segment::Key("a".into()),
                Segment::Key("c".into()),
                Segment::Index(0)
            ]
        );
        assert_eq!(
            decode("[2][10].x"),
            vec![Segment::Index(2), Segment::Index(10), Segment::Key("x".into())]
        );
        assert_eq!(decode("items[abc]"), vec![
            Segment::Key("items".into()),
            Segment::Key("abc".into())
        ]);
    }

    #[test]
    fn test_join_is_inverse_of_decode() {
        for path in ["a", "a.b", "a.c[0]", "[0]", "[0][1].k", "x.y.z[12].w"] {
            assert_eq!(join(&decode(path)), path);
        }
    }

    #[test]
    fn test_resolve() {
        let root = json!({"a": {"b": 1, "c": [true, null]}});
        assert_eq!(resolve(&root, ""), Some(&root));
        assert_eq!(resolve(&root, "a.b"), Some(&json!(1)));
        assert_eq!(resolve(&root, "a.c[0]"), Some(&json!(true)));
        // null is a value, not a miss
        assert_eq!(resolve(&root, "a.c[1]"), Some(&Value::Null));
        assert_eq!(resolve(&root, "a.c[2]"), None);
        assert_eq!(resolve(&root, "a.b.x"), None);
        assert_eq!(resolve(&root, "zzz"), None);
    }

    #[test]
    fn test_resolve_numeric_keys() {
        let root = json!({"0": "zero", "list": ["a", "b"]});
        assert_eq!(resolve(&root, "0"), Some(&json!("zero")));
        assert_eq!(resolve(&root, "[0]"), Some(&json!("zero")));
        assert_eq!(resolve(&root, "list.1"), Some(&json!("b")));
        assert_eq!(resolve(&root, "list.x"), None);
    }

    #[test]
    fn test_canonicalize() {
        let root = json!({"0": "zero", "list": ["a", {"k": 1}]});
        assert_eq!(canonicalize(&root, "list.1.k"), Some("list[1].k".to_string()));
        assert_eq!(canonicalize(&root, "list.0"), Some("list[0]".to_string()));
        assert_eq!(canonicalize(&root, "[0]"), Some("0".to_string()));
        assert_eq!(canonicalize(&root, ""), Some(String::new()));
        assert_eq!(canonicalize(&root, "list[9]"), None);
    }

    #[test]
    fn test_parent_and_ancestors() {
        assert_eq!(parent(""), None);
        assert_eq!(parent("a"), Some(String::new()));
        assert_eq!(parent("a.c[0]"), Some("a.c".to_string()));
        assert_eq!(ancestors("a.c[0]"), vec!["", "a", "a.c"]);
        assert!(ancestors("").is_empty());
        assert_eq!(depth("a.c[0]"), 3);
        assert_eq!(depth(""), 0);
        assert_eq!(last_segment("a.c[0]"), Some(Segment::Index(0)));
    }

    #[test]
    fn test_is_ancestor() {
        assert!(is_ancestor("", "a"));
        assert!(is_ancestor("a", "a.c[0]"));
        assert!(!is_ancestor("a.c[0]", "a.c[0]"));
        assert!(!is_ancestor("a.b", "a.bc"));
    }

    #[test]
    fn test_ambiguous_keys_do_not_round_trip() {
        let root = json!({"a.b": 1});
        let path = encode("", "a.b", false);
        assert_eq!(resolve(&root, &path), None);
    }

    #[test]
    fn test_dollar_key_round_trips() {
        let root = json!({"$": {"x": 1}, "x": 2});
        let inner = encode("", "$", false);
        assert_eq!(inner, "$");
        assert_eq!(resolve(&root, &inner), Some(&json!({"x": 1})));
        assert_eq!(resolve(&root, &encode(&inner, "x", false)), Some(&json!(1)));
        assert_eq!(resolve(&root, "x"), Some(&json!(2)));
        assert_eq!(join(&decode("$.x")), "$.x");
    }

    #[test]
    fn test_from_input() {
        assert_eq!(from_input("$"), "");
        assert_eq!(from_input(" $ "), "");
        assert_eq!(from_input("$.a[1]"), "a[1]");
        assert_eq!(from_input("$[0].k"), "[0].k");
        assert_eq!(from_input("$.$"), "$");
        assert_eq!(from_input("a.b"), "a.b");
        assert_eq!(from_input(""), "");
    }

    #[test]
    fn test_display() {
        assert_eq!(display(""), "$");
        assert_eq!(display("a.b"), "a.b");
    }
}
