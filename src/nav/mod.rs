//! Navigation and history controller.
//!
//! [`Navigator`] is the only thing that mutates [`SessionState`]. Views and
//! previews read the state through [`Navigator::state`].

pub mod history;
pub mod session;

pub use history::History;
pub use session::{SessionState, ViewMode};

use crate::document::{Document, path};
use crate::render::tree::visible_paths;
use serde_json::Value;

/// Directional input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Owns the session state for one document.
#[derive(Debug)]
pub struct Navigator<'doc> {
    doc: &'doc Document,
    state: SessionState,
}

impl<'doc> Navigator<'doc> {
    /// Start at root with an empty expansion set and `[root]` history.
    pub fn new(doc: &'doc Document, view_mode: ViewMode) -> Self {
        Self {
            doc,
            state: SessionState::new(view_mode),
        }
    }

    pub fn document(&self) -> &'doc Document {
        self.doc
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SessionState {
        &mut self.state
    }

    pub fn selection(&self) -> &str {
        &self.state.selection
    }

    pub fn view_mode(&self) -> ViewMode {
        self.state.view_mode
    }

    /// Value at the current selection. `None` only if the selection went stale.
    pub fn selected_value(&self) -> Option<&'doc Value> {
        self.doc.resolve(&self.state.selection)
    }

    fn has_selection(&self) -> bool {
        !path::is_root(&self.state.selection)
    }

    /// Set the selection without touching history or expansion. The ancestor
    /// chain follows the selection.
    pub fn select(&mut self, target: &str) -> bool {
        match self.doc.canonical_path(target) {
            Some(canonical) => {
                self.state.ancestor_chain = path::ancestors(&canonical);
                self.state.selection = canonical;
                true
            }
            None => false,
        }
    }

    /// Move to `target`, recompute the ancestor chain, expand its ancestors in
    /// tree view, and optionally record it in history.
    ///
    /// Returns `false` (and changes nothing) if `target` does not resolve.
    pub fn navigate(&mut self, target: &str, record_history: bool) -> bool {
        let Some(canonical) = self.doc.canonical_path(target) else {
            tracing::debug!(path = %target, "navigate: path not found");
            return false;
        };

        self.state.ancestor_chain = path::ancestors(&canonical);
        if self.state.view_mode == ViewMode::Tree {
            self.expand_ancestors();
        }
        if record_history {
            self.state.history.record(canonical.clone());
        }
        tracing::trace!(path = %path::display(&canonical), record_history, "navigate");
        self.state.selection = canonical;
        true
    }

    pub fn back(&mut self) -> bool {
        match self.state.history.back().map(str::to_string) {
            Some(target) => self.navigate(&target, false),
            None => false,
        }
    }

    pub fn forward(&mut self) -> bool {
        match self.state.history.forward().map(str::to_string) {
            Some(target) => self.navigate(&target, false),
            None => false,
        }
    }

    /// Change the active view. Interactive views with no selection start on
    /// the root's first child; history is not touched. Entering tree view
    /// expands the selection's ancestors so its row is visible.
    pub fn switch_view(&mut self, mode: ViewMode) {
        self.state.view_mode = mode;
        if mode.is_interactive()
            && !self.has_selection()
            && let Some(first) = self.doc.first_child("")
        {
            self.navigate(&first, false);
        }
        if mode == ViewMode::Tree {
            self.expand_ancestors();
        }
    }

    fn expand_ancestors(&mut self) {
        let ancestors = path::ancestors(&self.state.selection);
        self.state
            .expanded
            .extend(ancestors.into_iter().filter(|a| !path::is_root(a)));
    }

    /// Flip expansion of a container that has children. Tree view only.
    pub fn toggle_expand(&mut self, target: &str) -> bool {
        if self.state.view_mode != ViewMode::Tree || !self.has_children(target) {
            return false;
        }
        if !self.state.expanded.shift_remove(target) {
            self.state.expanded.insert(target.to_string());
        }
        true
    }

    /// Expand every non-empty container in the document.
    pub fn expand_all(&mut self) {
        fn walk(value: &Value, at: &str, out: &mut Vec<String>) {
            for child in crate::document::children_of(at, value) {
                if !crate::document::children_of(&child.path, child.value).is_empty() {
                    out.push(child.path.clone());
                    walk(child.value, &child.path, out);
                }
            }
        }
        let mut paths = Vec::new();
        walk(self.doc.root(), "", &mut paths);
        self.state.expanded.extend(paths);
    }

    pub fn collapse_all(&mut self) {
        self.state.expanded.clear();
    }

    fn has_children(&self, target: &str) -> bool {
        self.doc.first_child(target).is_some()
    }

    /// Interpret a directional key for the active view. Returns whether
    /// anything changed.
    pub fn move_selection(&mut self, direction: Direction) -> bool {
        match self.state.view_mode {
            ViewMode::Tree => self.move_in_tree(direction),
            ViewMode::Column => self.move_in_columns(direction),
            ViewMode::Raw => false,
        }
    }

    /// Jump to the first (or last) row of the tree, or sibling in columns.
    pub fn move_to_edge(&mut self, last: bool) -> bool {
        let candidates = match self.state.view_mode {
            ViewMode::Tree => visible_paths(self.doc, &self.state.expanded),
            ViewMode::Column => self.siblings(),
            ViewMode::Raw => return false,
        };
        let target = if last {
            candidates.last()
        } else {
            candidates.first()
        };
        match target {
            Some(target) if *target != self.state.selection => {
                let target = target.clone();
                self.select(&target)
            }
            _ => false,
        }
    }

    fn move_in_tree(&mut self, direction: Direction) -> bool {
        let selection = self.state.selection.clone();
        match direction {
            Direction::Up | Direction::Down => {
                let rows = visible_paths(self.doc, &self.state.expanded);
                let Some(start) = self.visible_anchor(&rows) else {
                    return match rows.first() {
                        Some(first) => {
                            let first = first.clone();
                            self.select(&first)
                        }
                        None => false,
                    };
                };
                let next = match direction {
                    Direction::Up => start.saturating_sub(1),
                    _ => (start + 1).min(rows.len() - 1),
                };
                if rows[next] == selection {
                    return false;
                }
                let target = rows[next].clone();
                self.select(&target)
            }
            Direction::Right => {
                if self.has_children(&selection) && !self.state.is_expanded(&selection) {
                    self.state.expanded.insert(selection);
                    true
                } else {
                    false
                }
            }
            Direction::Left => {
                if self.state.is_expanded(&selection) {
                    self.state.expanded.shift_remove(&selection);
                    return true;
                }
                self.move_to_parent()
            }
        }
    }

    /// Row index of the selection, or of its nearest visible ancestor.
    fn visible_anchor(&self, rows: &[String]) -> Option<usize> {
        let selection = &self.state.selection;
        rows.iter().position(|row| row == selection).or_else(|| {
            path::ancestors(selection)
                .iter()
                .rev()
                .find_map(|ancestor| rows.iter().position(|row| row == ancestor))
        })
    }

    fn move_in_columns(&mut self, direction: Direction) -> bool {
        let selection = self.state.selection.clone();
        match direction {
            Direction::Up | Direction::Down => {
                if !self.has_selection() {
                    return match self.doc.first_child("") {
                        Some(first) => self.navigate(&first, false),
                        None => false,
                    };
                }
                let siblings = self.siblings();
                let Some(current) = siblings.iter().position(|p| *p == selection) else {
                    return false;
                };
                let next = match direction {
                    Direction::Up => current.checked_sub(1),
                    _ => (current + 1 < siblings.len()).then_some(current + 1),
                };
                match next {
                    Some(next) => self.select(&siblings[next]),
                    None => false,
                }
            }
            Direction::Left => self.move_to_parent(),
            Direction::Right => match self.doc.first_child(&selection) {
                Some(child) => self.navigate(&child, true),
                None => false,
            },
        }
    }

    /// Go one level up. Top-level nodes stay put: root is not a selectable row.
    fn move_to_parent(&mut self) -> bool {
        match path::parent(&self.state.selection) {
            Some(parent) if !path::is_root(&parent) => self.navigate(&parent, true),
            _ => false,
        }
    }

    /// Paths sharing the selection's parent, in document order.
    fn siblings(&self) -> Vec<String> {
        let parent = path::parent(&self.state.selection).unwrap_or_default();
        self.doc
            .children(&parent)
            .into_iter()
            .map(|child| child.path)
            .collect()
    }
}
