//! Flat pre-order index of every node in a document.

use super::{Document, NodeKind, Segment, children_of, display_value};
use serde_json::Value;
use std::collections::BTreeMap;

/// Derived record for one document node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDescriptor<'a> {
    pub path: String,
    /// Mapping key, `[i]` for sequence items, empty for root.
    pub key: String,
    pub value: &'a Value,
    pub kind: NodeKind,
    pub display_value: String,
    pub depth: usize,
}

/// Every node of a document in pre-order, built once after load.
#[derive(Debug, Clone)]
pub struct FlatIndex<'a> {
    nodes: Vec<NodeDescriptor<'a>>,
}

impl<'a> FlatIndex<'a> {
    pub fn build(document: &'a Document) -> Self {
        Self::from_value(document.root())
    }

    /// Index an arbitrary value as if it were a document root.
    pub fn from_value(root: &'a Value) -> Self {
        fn visit<'a>(
            nodes: &mut Vec<NodeDescriptor<'a>>,
            path: String,
            key: String,
            value: &'a Value,
            depth: usize,
        ) {
            let children = children_of(&path, value);
            nodes.push(NodeDescriptor {
                path,
                key,
                value,
                kind: NodeKind::of(value),
                display_value: display_value(value),
                depth,
            });
            for child in children {
                let key = match &child.segment {
                    Segment::Key(key) => key.clone(),
                    Segment::Index(_) => child.label(),
                };
                visit(nodes, child.path, key, child.value, depth + 1);
            }
        }

        let mut nodes = Vec::new();
        visit(&mut nodes, String::new(), String::new(), root, 0);
        tracing::debug!(nodes = nodes.len(), "flat index built");
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeDescriptor<'a>> {
        self.nodes.iter()
    }

    pub fn nodes(&self) -> &[NodeDescriptor<'a>] {
        &self.nodes
    }

    pub fn get(&self, position: usize) -> Option<&NodeDescriptor<'a>> {
        self.nodes.get(position)
    }

    /// Pre-order position of `path`, if indexed.
    pub fn position(&self, path: &str) -> Option<usize> {
        self.nodes.iter().position(|node| node.path == path)
    }

    /// Node totals per kind, in kind order.
    pub fn counts_by_kind(&self) -> BTreeMap<NodeKind, usize> {
        let mut counts = BTreeMap::new();
        for node in &self.nodes {
            *counts.entry(node.kind).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pre_order() {
        let doc = Document::new(json!({"a": {"b": 1, "c": [true, null]}}), "t");
        let index = FlatIndex::build(&doc);
        let paths: Vec<_> = index.iter().map(|n| n.path.as_str()).collect();
        assert_eq!(paths, vec!["", "a", "a.b", "a.c", "a.c[0]", "a.c[1]"]);

        let keys: Vec<_> = index.iter().map(|n| n.key.as_str()).collect();
        assert_eq!(keys, vec!["", "a", "b", "c", "[0]", "[1]"]);

        let last = index.get(5).unwrap();
        assert_eq!(last.kind, NodeKind::Null);
        assert_eq!(last.depth, 3);
        assert_eq!(index.get(3).unwrap().display_value, "2 items");
    }

    #[test]
    fn test_every_descriptor_resolves() {
        let doc = Document::new(json!({"x": [{"y": [1, [2, {"z": "w"}]]}], "k": {}}), "t");
        let index = FlatIndex::build(&doc);
        for node in index.iter() {
            assert_eq!(doc.resolve(&node.path), Some(node.value), "{}", node.path);
        }
    }

    #[test]
    fn test_scalar_root() {
        let doc = Document::new(json!("just text"), "t");
        let index = FlatIndex::build(&doc);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get(0).unwrap().kind, NodeKind::String);
    }

    #[test]
    fn test_dollar_key_paths_are_distinct() {
        let doc = Document::new(json!({"$": {"x": 1}, "x": 2}), "t");
        let index = FlatIndex::build(&doc);
        let paths: Vec<&str> = index.iter().map(|node| node.path.as_str()).collect();
        assert_eq!(paths, vec!["", "$", "$.x", "x"]);
        for node in index.iter() {
            assert!(std::ptr::eq(doc.resolve(&node.path).unwrap(), node.value));
        }
    }

    #[test]
    fn test_position_and_counts() {
        let doc = Document::new(json!({"a": 1, "b": [1, "x"]}), "t");
        let index = FlatIndex::build(&doc);
        assert_eq!(index.position(""), Some(0));
        assert_eq!(index.position("b[1]"), Some(4));
        assert_eq!(index.position("nope"), None);

        let counts = index.counts_by_kind();
        assert_eq!(counts[&NodeKind::Number], 2);
        assert_eq!(counts[&NodeKind::Object], 1);
        assert_eq!(counts.get(&NodeKind::Null), None);
    }
}
