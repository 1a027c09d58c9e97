//! Mutable session state, owned by the navigator.

use super::history::History;
use crate::preview::QueryCache;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Which view renders the document.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ViewMode {
    #[default]
    Tree,
    Column,
    Raw,
}

impl ViewMode {
    /// Next mode in tree → column → raw order.
    pub fn cycle(self) -> Self {
        match self {
            ViewMode::Tree => ViewMode::Column,
            ViewMode::Column => ViewMode::Raw,
            ViewMode::Raw => ViewMode::Tree,
        }
    }

    /// Whether the mode has an interactive selection.
    pub fn is_interactive(self) -> bool {
        !matches!(self, ViewMode::Raw)
    }
}

/// Everything that changes during a session.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Always resolvable, or root.
    pub selection: String,
    /// Expanded container paths (tree view).
    pub expanded: IndexSet<String>,
    pub history: History,
    pub view_mode: ViewMode,
    /// Root first, immediate parent of the selection last.
    pub ancestor_chain: Vec<String>,
    pub queries: QueryCache,
}

impl SessionState {
    pub fn new(view_mode: ViewMode) -> Self {
        Self {
            selection: String::new(),
            expanded: IndexSet::new(),
            history: History::new(""),
            view_mode,
            ancestor_chain: Vec::new(),
            queries: QueryCache::default(),
        }
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.expanded.contains(path)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(ViewMode::default())
    }
}
