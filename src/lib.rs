//! # treenav
//!
//! A navigator library for hierarchical documents (JSON and TOML) with typed
//! paths, value classification, fuzzy search and three views.
//!
//! This library provides the engine behind the `treenav` terminal UI, and every
//! piece of it works without a terminal: the navigator mutates a session state,
//! renderers turn that state into rows and columns, and previews describe what
//! to show for a value.
//!
//! ## Features
//!
//! - Path codec (`a.b[0].c`) with `$` for the root
//! - Value classification (URLs, file paths, colors, dates, markdown)
//! - Pre-order flat index and multi-word fuzzy search
//! - Navigation with back/forward history across tree, column and raw views
//! - Type-aware previews with background file queries
//!
//! ## Example
//!
//! ```rust
//! use treenav::{Document, Navigator, ViewMode};
//! use treenav::document::FlatIndex;
//!
//! let doc = Document::parse_any(r#"{"servers": [{"host": "alpha"}]}"#, "example").unwrap();
//!
//! let mut nav = Navigator::new(&doc, ViewMode::Tree);
//! assert!(nav.navigate("servers[0].host", true));
//! assert_eq!(nav.selected_value().and_then(|v| v.as_str()), Some("alpha"));
//!
//! let index = FlatIndex::build(&doc);
//! let results = treenav::search::search(&index, "alpha", 10);
//! assert_eq!(results[0].path, "servers[0].host");
//! ```

/// Configuration module for persisting user preferences.
///
/// Theme, default view, pane width, search and preview limits, and key overrides.
pub mod config;

/// Document model, path codec, type classifier and flat index.
pub mod document;

/// Clipboard, launcher, save and file-system collaborators.
pub mod host;

/// Keybindings module for customizable keyboard shortcuts.
///
/// Provides a flexible keybinding system that allows users to customize
/// keyboard shortcuts via configuration files.
pub mod keybindings;

/// Navigation and history controller over a session state.
pub mod nav;

/// Preview composition for the selected value.
pub mod preview;

/// Pure renderers for the tree, column and raw views.
pub mod render;

/// Fuzzy search with debounce.
pub mod search;

/// TUI module for the interactive terminal interface.
pub mod tui;

// Re-export commonly used types for convenience
pub use config::Config;
pub use document::Document;
pub use nav::{Navigator, SessionState, ViewMode};
pub use tui::App;
