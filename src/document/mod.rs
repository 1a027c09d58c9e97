//! Hierarchical document model.
//!
//! A [`Document`] wraps an insertion-ordered [`serde_json::Value`] tree and is
//! immutable for the lifetime of a session. Everything else in the crate
//! (paths, classification, the flat index, search and the views) reads it
//! through shared references.

pub mod classify;
pub mod color;
pub mod date;
pub mod index;
pub mod path;

pub use classify::{MediaCategory, MediaType, Subtype, TypeInfo, classify};
pub use index::{FlatIndex, NodeDescriptor};
pub use path::{ROOT_MARKER, Segment};

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("input is neither valid JSON nor valid TOML")]
    UnknownFormat,
}

/// Input formats accepted by [`Document::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Toml,
}

impl Format {
    /// Guess the format from a file extension (`.toml` is TOML, anything else JSON).
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Format::Toml,
            _ => Format::Json,
        }
    }
}

/// Structural kind of a value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NodeKind {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

impl NodeKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => NodeKind::Object,
            Value::Array(_) => NodeKind::Array,
            Value::String(_) => NodeKind::String,
            Value::Number(_) => NodeKind::Number,
            Value::Bool(_) => NodeKind::Boolean,
            Value::Null => NodeKind::Null,
        }
    }

    pub fn is_container(self) -> bool {
        matches!(self, NodeKind::Object | NodeKind::Array)
    }
}

/// A loaded document.
#[derive(Debug, Clone)]
pub struct Document {
    root: Value,
    source: String,
}

impl Document {
    /// Wrap an already-parsed value. `source` is a display name (file name or `stdin`).
    pub fn new(root: Value, source: impl Into<String>) -> Self {
        Self {
            root,
            source: source.into(),
        }
    }

    /// Read and parse a file, choosing the format from its extension.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document")
            .to_string();
        let document = Self::parse(&content, Format::from_path(path), name)?;
        tracing::info!(source = %document.source, "document loaded");
        Ok(document)
    }

    /// Parse content in a known format.
    pub fn parse(
        content: &str,
        format: Format,
        source: impl Into<String>,
    ) -> Result<Self, DocumentError> {
        let root = match format {
            Format::Json => serde_json::from_str(content)?,
            Format::Toml => {
                let table = toml::from_str::<toml::Table>(content)?;
                toml_to_json(toml::Value::Table(table))
            }
        };
        Ok(Self::new(root, source))
    }

    /// Parse content of unknown format: JSON first, then TOML.
    pub fn parse_any(content: &str, source: impl Into<String>) -> Result<Self, DocumentError> {
        let source = source.into();
        if let Ok(document) = Self::parse(content, Format::Json, source.clone()) {
            return Ok(document);
        }
        Self::parse(content, Format::Toml, source).map_err(|_| DocumentError::UnknownFormat)
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Display name of the document source.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Resolve a path against this document. `None` means the path does not exist,
    /// which is distinct from `Some(&Value::Null)`.
    pub fn resolve(&self, path: &str) -> Option<&Value> {
        path::resolve(&self.root, path)
    }

    /// Canonical spelling of `path` in this document, if it resolves.
    pub fn canonical_path(&self, path: &str) -> Option<String> {
        path::canonicalize(&self.root, path)
    }

    /// Ordered children of the node at `path` (empty for scalars and unknown paths).
    pub fn children(&self, path: &str) -> Vec<Child<'_>> {
        self.resolve(path)
            .map(|value| children_of(path, value))
            .unwrap_or_default()
    }

    /// Path of the first child of the node at `path`, if it is a non-empty container.
    pub fn first_child(&self, path: &str) -> Option<String> {
        self.children(path).into_iter().next().map(|child| child.path)
    }

    /// Pretty-printed serialization of the whole document.
    pub fn to_pretty_string(&self) -> String {
        serde_json::to_string_pretty(&self.root).unwrap_or_else(|_| self.root.to_string())
    }
}

/// One child of a container, with its encoded path.
#[derive(Debug, Clone)]
pub struct Child<'a> {
    pub path: String,
    pub segment: Segment,
    pub value: &'a Value,
}

impl Child<'_> {
    /// Label shown in views: the key for mapping children, `[i]` for sequence items.
    pub fn label(&self) -> String {
        self.segment.to_string()
    }
}

/// Children of `value`, whose own path is `parent_path`.
pub fn children_of<'a>(parent_path: &str, value: &'a Value) -> Vec<Child<'a>> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(key, child)| Child {
                path: path::encode(parent_path, key, false),
                segment: Segment::Key(key.clone()),
                value: child,
            })
            .collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, child)| Child {
                path: path::encode(parent_path, &i.to_string(), true),
                segment: Segment::Index(i),
                value: child,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Short textual summary: item/key count for containers, string form otherwise.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Object(map) => plural(map.len(), "key", "keys"),
        Value::Array(items) => plural(items.len(), "item", "items"),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
    }
}

fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("1 {}", one)
    } else {
        format!("{} {}", count, many)
    }
}

/// Convert a TOML value into the document value model, keeping table order.
fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(f.to_string())),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_json(value)))
                .collect(),
        ),
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_pretty_string())
    }
}
