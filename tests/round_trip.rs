use proptest::prelude::*;
use serde_json::{Map, Value};
use treenav::document::{FlatIndex, path};
use treenav::{Document, Navigator, ViewMode};

/// Keys the path codec can represent: no `.`, `[` or `]`, never empty.
/// `$` is an ordinary key.
fn key() -> impl Strategy<Value = String> {
    prop_oneof![
        1 => Just("$".to_string()),
        8 => "[a-z$][a-z0-9_ $-]{0,7}",
    ]
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[ -~]{0,16}".prop_map(Value::String),
    ]
}

fn document_value() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec((key(), inner), 0..6)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

proptest! {
    #[test]
    fn every_indexed_path_resolves_to_its_value(root in document_value()) {
        let doc = Document::new(root, "generated");
        let index = FlatIndex::build(&doc);
        for node in index.iter() {
            let resolved = doc.resolve(&node.path);
            prop_assert!(resolved.is_some(), "{} did not resolve", node.path);
            prop_assert!(std::ptr::eq(resolved.unwrap(), node.value));
        }
    }

    #[test]
    fn encoding_is_stable(root in document_value()) {
        let doc = Document::new(root, "generated");
        let index = FlatIndex::build(&doc);
        for node in index.iter() {
            prop_assert_eq!(path::join(&path::decode(&node.path)), node.path.clone());
        }
    }

    #[test]
    fn navigate_selects_canonical_path(root in document_value()) {
        let doc = Document::new(root, "generated");
        let index = FlatIndex::build(&doc);
        let mut nav = Navigator::new(&doc, ViewMode::Tree);
        for node in index.iter() {
            prop_assert!(nav.navigate(&node.path, true));
            prop_assert_eq!(nav.selection(), node.path.as_str());
        }
    }
}
