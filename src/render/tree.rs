//! Tree view: indented rows, children shown only under expanded containers.

use crate::document::{Document, NodeKind, ROOT_MARKER, children_of, classify, display_value};
use crate::nav::SessionState;
use indexmap::IndexSet;
use serde_json::Value;

/// Size of the cosmetic depth palette.
pub const DEPTH_PALETTE_SIZE: usize = 8;

/// One visible row of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub path: String,
    pub label: String,
    /// Top-level children sit at depth 0.
    pub depth: usize,
    pub kind: NodeKind,
    /// Compound type label, e.g. `url→image→png`.
    pub type_label: String,
    pub summary: String,
    pub expandable: bool,
    pub expanded: bool,
    pub selected: bool,
    /// Index into the depth palette.
    pub depth_color: usize,
}

/// Rows for the current state, in display order.
///
/// A scalar document renders as a single root row.
pub fn render(doc: &Document, state: &SessionState) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    let root = doc.root();
    if root.is_object() || root.is_array() {
        push_children(&mut rows, "", root, 0, state);
    } else {
        rows.push(row(
            String::new(),
            ROOT_MARKER.to_string(),
            root,
            0,
            state,
        ));
    }
    rows
}

fn push_children(
    rows: &mut Vec<TreeRow>,
    parent: &str,
    value: &Value,
    depth: usize,
    state: &SessionState,
) {
    for child in children_of(parent, value) {
        let label = child.label();
        let tree_row = row(child.path, label, child.value, depth, state);
        let descend = tree_row.expanded;
        let path = tree_row.path.clone();
        rows.push(tree_row);
        if descend {
            push_children(rows, &path, child.value, depth + 1, state);
        }
    }
}

fn row(path: String, label: String, value: &Value, depth: usize, state: &SessionState) -> TreeRow {
    let expandable = match value {
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => false,
    };
    TreeRow {
        expanded: expandable && state.is_expanded(&path),
        selected: path == state.selection,
        label,
        depth,
        kind: NodeKind::of(value),
        type_label: classify(value).label(),
        summary: display_value(value),
        expandable,
        depth_color: depth % DEPTH_PALETTE_SIZE,
        path,
    }
}

/// Paths of the visible rows, in display order.
pub fn visible_paths(doc: &Document, expanded: &IndexSet<String>) -> Vec<String> {
    fn walk(parent: &str, value: &Value, expanded: &IndexSet<String>, out: &mut Vec<String>) {
        for child in children_of(parent, value) {
            let open = expanded.contains(&child.path);
            out.push(child.path.clone());
            if open {
                walk(&child.path, child.value, expanded, out);
            }
        }
    }

    let root = doc.root();
    let mut out = Vec::new();
    if root.is_object() || root.is_array() {
        walk("", root, expanded, &mut out);
    } else {
        out.push(String::new());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::{Navigator, ViewMode};
    use serde_json::json;

    fn doc() -> Document {
        Document::new(json!({"a": {"b": 1, "c": [true, null]}, "d": "https://x.io/p.png"}), "t")
    }

    #[test]
    fn test_collapsed_rows() {
        let doc = doc();
        let state = SessionState::default();
        let rows = render(&doc, &state);
        let paths: Vec<_> = rows.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["a", "d"]);
        assert!(rows[0].expandable);
        assert!(!rows[0].expanded);
        assert_eq!(rows[1].type_label, "url→image→png");
    }

    #[test]
    fn test_expanded_rows_follow_navigation() {
        let doc = doc();
        let mut nav = Navigator::new(&doc, ViewMode::Tree);
        nav.navigate("a.c[1]", true);
        let rows = render(&doc, nav.state());
        let paths: Vec<_> = rows.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["a", "a.b", "a.c", "a.c[0]", "a.c[1]", "d"]);

        let selected: Vec<_> = rows.iter().filter(|r| r.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].label, "[1]");
        assert_eq!(selected[0].depth, 2);
        assert_eq!(selected[0].summary, "null");
        assert_eq!(paths, visible_paths(&doc, &nav.state().expanded));
    }

    #[test]
    fn test_depth_color_cycles() {
        let mut value = json!(1);
        for _ in 0..10 {
            value = json!({ "n": value });
        }
        let doc = Document::new(value, "t");
        let mut nav = Navigator::new(&doc, ViewMode::Tree);
        nav.expand_all();
        let rows = render(&doc, nav.state());
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[8].depth, 8);
        assert_eq!(rows[8].depth_color, 0);
        assert_eq!(rows[9].depth_color, 1);
    }

    #[test]
    fn test_scalar_document() {
        let doc = Document::new(json!(42), "t");
        let rows = render(&doc, &SessionState::default());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "$");
        assert!(rows[0].selected);
        assert_eq!(visible_paths(&doc, &IndexSet::new()), vec![String::new()]);
    }
}
