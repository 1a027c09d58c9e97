//! Column (Miller) view: one sibling list per level of the selection's path.

use crate::document::{Document, NodeKind, children_of, display_value, path};
use crate::nav::SessionState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnEntry {
    pub path: String,
    pub label: String,
    pub kind: NodeKind,
    pub summary: String,
    pub is_container: bool,
}

/// Children of `parent`, with the entry on the selection's path marked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub parent: String,
    pub entries: Vec<ColumnEntry>,
    pub selected: Option<usize>,
}

/// Columns for the current state, leftmost first.
///
/// One column per entry of the ancestor chain, plus a trailing column for the
/// selection's own children when it is a container.
pub fn render(doc: &Document, state: &SessionState) -> Vec<Column> {
    let selection = state.selection.as_str();
    let mut chain: Vec<&str> = state.ancestor_chain.iter().map(String::as_str).collect();
    if path::is_root(selection) {
        chain = vec![""];
    } else if doc.resolve(selection).is_some_and(|v| v.is_object() || v.is_array()) {
        chain.push(selection);
    }

    chain
        .into_iter()
        .filter_map(|parent| {
            let value = doc.resolve(parent)?;
            let entries: Vec<ColumnEntry> = children_of(parent, value)
                .into_iter()
                .map(|child| ColumnEntry {
                    label: child.label(),
                    kind: NodeKind::of(child.value),
                    summary: display_value(child.value),
                    is_container: child.value.is_object() || child.value.is_array(),
                    path: child.path,
                })
                .collect();
            let selected = entries.iter().position(|entry| {
                entry.path == selection || path::is_ancestor(&entry.path, selection)
            });
            Some(Column {
                parent: parent.to_string(),
                entries,
                selected,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::{Navigator, ViewMode};
    use serde_json::json;

    fn labels(column: &Column) -> Vec<&str> {
        column.entries.iter().map(|e| e.label.as_str()).collect()
    }

    #[test]
    fn test_three_columns_for_nested_scalar() {
        let doc = Document::new(json!({"a": {"b": 1, "c": [true, null]}}), "t");
        let mut nav = Navigator::new(&doc, ViewMode::Tree);
        nav.navigate("a.c[0]", true);
        nav.switch_view(ViewMode::Column);

        let columns = render(&doc, nav.state());
        assert_eq!(columns.len(), 3);
        assert_eq!(labels(&columns[0]), vec!["a"]);
        assert_eq!(labels(&columns[1]), vec!["b", "c"]);
        assert_eq!(labels(&columns[2]), vec!["[0]", "[1]"]);
        assert_eq!(columns[0].selected, Some(0));
        assert_eq!(columns[1].selected, Some(1));
        assert_eq!(columns[2].selected, Some(0));
    }

    #[test]
    fn test_container_selection_adds_trailing_column() {
        let doc = Document::new(json!({"a": {"b": 1, "c": [true, null]}}), "t");
        let mut nav = Navigator::new(&doc, ViewMode::Column);
        nav.navigate("a.c", true);
        let columns = render(&doc, nav.state());
        assert_eq!(columns.len(), 3);
        assert_eq!(columns[2].parent, "a.c");
        assert_eq!(columns[2].selected, None);

        // moving up to a scalar sibling drops the trailing column
        nav.select("a.b");
        let columns = render(&doc, nav.state());
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[1].selected, Some(0));
    }

    #[test]
    fn test_root_selection_lists_top_level() {
        let doc = Document::new(json!(["x", {"y": 1}]), "t");
        let state = SessionState::new(ViewMode::Column);
        let columns = render(&doc, &state);
        assert_eq!(columns.len(), 1);
        assert_eq!(labels(&columns[0]), vec!["[0]", "[1]"]);
        assert_eq!(columns[0].selected, None);
        assert!(columns[0].entries[1].is_container);
    }
}
