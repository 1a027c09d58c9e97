//! Preview dispatcher.
//!
//! [`compose`] picks one composer for the selected value and returns a fixed
//! order property table (`path`, `type`, then type-specific fields) plus a
//! body for the rich part of the preview. File paths depend on an external
//! query; until its result is in the [`QueryCache`] the body reports it as
//! pending.

pub mod media;
pub mod query;

pub use media::AudioSlot;
pub use query::{QueryCache, QueryResult, QueryWorker, run_query};

use crate::document::color::{self, Rgba};
use crate::document::date;
use crate::document::{MediaType, Subtype, TypeInfo, classify, path};
use crate::host::FilePreview;
use serde_json::Value;

/// Which composer built a preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Composer {
    Url,
    Color,
    Date,
    FilePath,
    Markdown,
    Default,
}

impl Composer {
    pub fn for_subtype(subtype: &Subtype) -> Self {
        match subtype {
            Subtype::Url(_) => Composer::Url,
            Subtype::FilePath(_) => Composer::FilePath,
            Subtype::Color => Composer::Color,
            Subtype::Date => Composer::Date,
            Subtype::Markdown => Composer::Markdown,
            _ => Composer::Default,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: &'static str,
    pub value: String,
}

impl Property {
    fn new(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

/// Rich part of a preview.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewBody {
    /// The selection does not resolve.
    Empty,
    Text(String),
    /// Markdown source; the UI renders it or falls back to the raw text.
    Markdown(String),
    /// Serialized container, cut to the configured line cap.
    Json { text: String, hidden_lines: usize },
    Color(Rgba),
    Date { long_form: String },
    Link { href: String, media: Option<MediaType> },
    /// `result` is `None` while the query is in flight.
    File {
        path: String,
        media: Option<MediaType>,
        result: Option<QueryResult>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub composer: Composer,
    pub properties: Vec<Property>,
    pub body: PreviewBody,
}

impl Preview {
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewOptions {
    /// Max lines of serialized JSON shown for containers.
    pub json_line_cap: usize,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self { json_line_cap: 200 }
    }
}

/// Cache key of the file query a value needs, if any.
pub fn query_key(value: &Value) -> Option<String> {
    match (value, classify(value).subtype) {
        (Value::String(s), Subtype::FilePath(_)) => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Build the preview for `value` at `at`. `None` renders the empty state.
pub fn compose(
    at: &str,
    value: Option<&Value>,
    cache: &QueryCache,
    options: &PreviewOptions,
) -> Preview {
    let Some(value) = value else {
        return Preview {
            composer: Composer::Default,
            properties: vec![Property::new("path", path::display(at))],
            body: PreviewBody::Empty,
        };
    };

    let info = classify(value);
    let composer = Composer::for_subtype(&info.subtype);
    let mut properties = vec![
        Property::new("path", path::display(at)),
        Property::new("type", info.label()),
    ];
    let text = value.as_str().unwrap_or_default();

    let body = match composer {
        Composer::Url => compose_url(text, &info, &mut properties),
        Composer::Color => compose_color(text, &mut properties),
        Composer::Date => compose_date(text, &mut properties),
        Composer::FilePath => compose_file(text, &info, cache, &mut properties),
        Composer::Markdown => {
            properties.extend(text_metrics(text));
            PreviewBody::Markdown(text.to_string())
        }
        Composer::Default => compose_default(value, options, &mut properties),
    };

    Preview {
        composer,
        properties,
        body,
    }
}

fn text_metrics(text: &str) -> [Property; 3] {
    [
        Property::new("length", text.chars().count().to_string()),
        Property::new("lines", text.lines().count().max(1).to_string()),
        Property::new("words", text.split_whitespace().count().to_string()),
    ]
}

fn compose_url(text: &str, info: &TypeInfo, properties: &mut Vec<Property>) -> PreviewBody {
    let href = text.trim();
    properties.push(Property::new("length", href.chars().count().to_string()));
    properties.push(Property::new("href", href));
    match url::Url::parse(href) {
        Ok(parsed) => {
            properties.push(Property::new("origin", parsed.origin().ascii_serialization()));
            properties.push(Property::new("protocol", format!("{}:", parsed.scheme())));
            properties.push(Property::new("host", parsed.host_str().unwrap_or_default()));
            properties.push(Property::new("pathname", parsed.path()));
            if let Some(query) = parsed.query() {
                properties.push(Property::new("search", format!("?{}", query)));
            }
            if let Some(fragment) = parsed.fragment() {
                properties.push(Property::new("hash", format!("#{}", fragment)));
            }
        }
        Err(e) => properties.push(Property::new("error", e.to_string())),
    }
    PreviewBody::Link {
        href: href.to_string(),
        media: info.subtype.media().cloned(),
    }
}

fn compose_color(text: &str, properties: &mut Vec<Property>) -> PreviewBody {
    match color::parse(text) {
        Some(rgba) => {
            properties.push(Property::new("hex", rgba.to_hex()));
            properties.push(Property::new("rgb", rgba.to_css_rgb()));
            properties.push(Property::new("hsl", rgba.to_css_hsl()));
            properties.push(Property::new("alpha", format!("{}", rgba.a)));
            PreviewBody::Color(rgba)
        }
        None => PreviewBody::Text(text.to_string()),
    }
}

fn compose_date(text: &str, properties: &mut Vec<Property>) -> PreviewBody {
    match date::parse(text) {
        Some(parsed) => {
            properties.push(Property::new("iso", parsed.iso()));
            properties.push(Property::new("unix", parsed.unix_seconds().to_string()));
            properties.push(Property::new("unix_ms", parsed.unix_millis().to_string()));
            properties.push(Property::new(
                "weekday",
                parsed.date.format("%A").to_string(),
            ));
            PreviewBody::Date {
                long_form: parsed.long_form(),
            }
        }
        None => PreviewBody::Text(text.to_string()),
    }
}

fn compose_file(
    text: &str,
    info: &TypeInfo,
    cache: &QueryCache,
    properties: &mut Vec<Property>,
) -> PreviewBody {
    let key = text.trim();
    let media = info.subtype.media().cloned();
    properties.push(Property::new("length", key.chars().count().to_string()));
    if let Some(media) = &media {
        properties.push(Property::new("extension", media.extension.clone()));
        properties.push(Property::new("category", media.category.to_string()));
    }

    let result = cache.get(key).cloned();
    match &result {
        None => properties.push(Property::new("exists", "checking…")),
        Some(QueryResult::Missing) => properties.push(Property::new("exists", "no")),
        Some(found) => {
            properties.push(Property::new("exists", "yes"));
            if let Some(status) = found.status() {
                let kind = if status.is_dir { "directory" } else { "file" };
                properties.push(Property::new("kind", kind));
                if !status.is_dir {
                    properties.push(Property::new("size", format_bytes(status.size)));
                }
                if let Some(modified) = status.modified {
                    properties.push(Property::new(
                        "modified",
                        modified.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
                    ));
                }
            }
            if let QueryResult::File {
                content: FilePreview::Image { width, height, .. },
                ..
            } = found
            {
                properties.push(Property::new("dimensions", format!("{}×{}", width, height)));
            }
        }
    }

    PreviewBody::File {
        path: key.to_string(),
        media,
        result,
    }
}

fn compose_default(
    value: &Value,
    options: &PreviewOptions,
    properties: &mut Vec<Property>,
) -> PreviewBody {
    match value {
        Value::Object(map) => {
            properties.push(Property::new("keys", map.len().to_string()));
            properties.push(Property::new("descendants", descendants(value).to_string()));
            json_body(value, options.json_line_cap)
        }
        Value::Array(items) => {
            properties.push(Property::new("items", items.len().to_string()));
            properties.push(Property::new("descendants", descendants(value).to_string()));
            json_body(value, options.json_line_cap)
        }
        Value::String(s) => {
            properties.extend(text_metrics(s));
            PreviewBody::Text(s.clone())
        }
        Value::Number(n) => PreviewBody::Text(n.to_string()),
        Value::Bool(b) => PreviewBody::Text(b.to_string()),
        Value::Null => PreviewBody::Text("null".to_string()),
    }
}

fn descendants(value: &Value) -> usize {
    match value {
        Value::Object(map) => map.values().map(|v| 1 + descendants(v)).sum(),
        Value::Array(items) => items.iter().map(|v| 1 + descendants(v)).sum(),
        _ => 0,
    }
}

fn json_body(value: &Value, line_cap: usize) -> PreviewBody {
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    let total = pretty.lines().count();
    if total <= line_cap {
        return PreviewBody::Json {
            text: pretty,
            hidden_lines: 0,
        };
    }
    PreviewBody::Json {
        text: pretty.lines().take(line_cap).collect::<Vec<_>>().join("\n"),
        hidden_lines: total - line_cap,
    }
}

/// Binary-prefixed size, e.g. `1.5 KiB`.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", size, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::PathStatus;
    use serde_json::json;

    fn names(preview: &Preview) -> Vec<&str> {
        preview.properties.iter().map(|p| p.name).collect()
    }

    fn preview(value: Value) -> Preview {
        compose("x", Some(&value), &QueryCache::default(), &PreviewOptions::default())
    }

    #[test]
    fn test_missing_selection_is_empty() {
        let preview = compose("a.zz", None, &QueryCache::default(), &PreviewOptions::default());
        assert_eq!(preview.body, PreviewBody::Empty);
        assert_eq!(names(&preview), vec!["path"]);
    }

    #[test]
    fn test_url_composer() {
        let preview = preview(json!("https://example.com:8080/img/a.png?q=1#top"));
        assert_eq!(preview.composer, Composer::Url);
        assert_eq!(&names(&preview)[..2], &["path", "type"]);
        assert_eq!(preview.property("type"), Some("url→image→png"));
        assert_eq!(preview.property("origin"), Some("https://example.com:8080"));
        assert_eq!(preview.property("protocol"), Some("https:"));
        assert_eq!(preview.property("pathname"), Some("/img/a.png"));
        assert_eq!(preview.property("search"), Some("?q=1"));
        assert_eq!(preview.property("hash"), Some("#top"));
    }

    #[test]
    fn test_color_composer() {
        let preview = preview(json!("#ff0000"));
        assert_eq!(preview.composer, Composer::Color);
        assert_eq!(
            names(&preview),
            vec!["path", "type", "hex", "rgb", "hsl", "alpha"]
        );
        assert_eq!(preview.property("rgb"), Some("rgb(255, 0, 0)"));
        assert_eq!(preview.property("hsl"), Some("hsl(0, 100%, 50%)"));
        assert_eq!(preview.body, PreviewBody::Color(Rgba::opaque(255, 0, 0)));
    }

    #[test]
    fn test_date_composer() {
        let preview = preview(json!("1970-01-02"));
        assert_eq!(preview.composer, Composer::Date);
        assert_eq!(preview.property("unix"), Some("86400"));
        assert_eq!(preview.property("iso"), Some("1970-01-02T00:00:00.000Z"));
        assert_eq!(preview.property("weekday"), Some("Friday"));
    }

    #[test]
    fn test_file_composer_pending_then_cached() {
        let value = json!("/tmp/report.pdf");
        let mut cache = QueryCache::default();
        let pending = compose("f", Some(&value), &cache, &PreviewOptions::default());
        assert_eq!(pending.composer, Composer::FilePath);
        assert_eq!(pending.property("exists"), Some("checking…"));
        assert_eq!(pending.property("category"), Some("document"));
        assert_eq!(query_key(&value), Some("/tmp/report.pdf".to_string()));

        cache.complete(
            "/tmp/report.pdf".into(),
            QueryResult::File {
                status: PathStatus {
                    is_dir: false,
                    size: 2048,
                    modified: None,
                },
                content: FilePreview::Unknown { bytes: 2048 },
            },
        );
        let ready = compose("f", Some(&value), &cache, &PreviewOptions::default());
        assert_eq!(ready.property("exists"), Some("yes"));
        assert_eq!(ready.property("kind"), Some("file"));
        assert_eq!(ready.property("size"), Some("2.0 KiB"));
    }

    #[test]
    fn test_markdown_composer() {
        let text = "# Title\n\n- one\n- two\n\nSome **bold** text.";
        let preview = preview(json!(text));
        assert_eq!(preview.composer, Composer::Markdown);
        assert_eq!(preview.property("lines"), Some("6"));
        assert_eq!(preview.body, PreviewBody::Markdown(text.to_string()));
    }

    #[test]
    fn test_default_composer() {
        let preview = preview(json!({"a": [1, 2], "b": null}));
        assert_eq!(preview.composer, Composer::Default);
        assert_eq!(names(&preview), vec!["path", "type", "keys", "descendants"]);
        assert_eq!(preview.property("descendants"), Some("4"));

        let plain = self::preview(json!("hello world"));
        assert_eq!(plain.property("words"), Some("2"));
        assert_eq!(plain.body, PreviewBody::Text("hello world".into()));
        assert_eq!(query_key(&json!("hello")), None);
    }

    #[test]
    fn test_json_line_cap() {
        let items: Vec<_> = (0..10).collect();
        let options = PreviewOptions { json_line_cap: 4 };
        let preview = compose("x", Some(&json!(items)), &QueryCache::default(), &options);
        match preview.body {
            PreviewBody::Json { text, hidden_lines } => {
                assert_eq!(text.lines().count(), 4);
                assert_eq!(hidden_lines, 8);
            }
            other => panic!("unexpected body: {:?}", other),
        }
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KiB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MiB");
    }
}
