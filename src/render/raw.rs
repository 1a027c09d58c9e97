//! Raw view: the whole document serialized once.

use crate::document::Document;
use std::cell::OnceCell;

/// Lazily formatted, cached serialization of a document.
#[derive(Debug, Default)]
pub struct RawView {
    text: OnceCell<String>,
}

impl RawView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretty-printed document. Formatting happens on first call only.
    pub fn text(&self, doc: &Document) -> &str {
        self.text.get_or_init(|| {
            tracing::debug!(source = doc.source(), "formatting raw view");
            doc.to_pretty_string()
        })
    }

    pub fn line_count(&self, doc: &Document) -> usize {
        self.text(doc).lines().count()
    }

    pub fn is_cached(&self) -> bool {
        self.text.get().is_some()
    }
}
