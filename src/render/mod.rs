//! View renderers.
//!
//! Each renderer is a pure function of the document and the session state
//! that returns render instructions (rows, columns, text). Painting them is the
//! terminal UI's job.

pub mod column;
pub mod raw;
pub mod tree;

pub use column::{Column, ColumnEntry};
pub use raw::RawView;
pub use tree::TreeRow;

use crate::document::path;
use crate::nav::{SessionState, ViewMode};
use std::fmt;

/// Contents of the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub view: ViewMode,
    /// Display form of the selection (`$` for root).
    pub path: String,
    /// 1-based history position.
    pub history_position: usize,
    pub history_len: usize,
    pub node_count: usize,
}

impl StatusInfo {
    pub fn new(state: &SessionState, node_count: usize) -> Self {
        Self {
            view: state.view_mode,
            path: path::display(&state.selection).to_string(),
            history_position: state.history.index() + 1,
            history_len: state.history.len(),
            node_count,
        }
    }
}

impl fmt::Display for StatusInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} │ {} │ {}/{} │ {} nodes",
            self.view, self.path, self.history_position, self.history_len, self.node_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::nav::Navigator;
    use serde_json::json;

    #[test]
    fn test_status_reports_selection_in_raw_mode() {
        let doc = Document::new(json!({"a": {"b": 1}}), "t");
        let mut nav = Navigator::new(&doc, ViewMode::Tree);
        nav.navigate("a.b", true);
        nav.switch_view(ViewMode::Raw);
        let status = StatusInfo::new(nav.state(), 3);
        assert_eq!(status.to_string(), "raw │ a.b │ 2/2 │ 3 nodes");
    }

    #[test]
    fn test_status_root() {
        let status = StatusInfo::new(&SessionState::default(), 1);
        assert_eq!(status.path, "$");
        assert_eq!(status.history_position, 1);
    }
}
