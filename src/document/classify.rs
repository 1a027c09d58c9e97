//! Value type classification.
//!
//! Every value has a structural [`NodeKind`]. Strings are refined further by
//! a priority-ordered set of heuristics: URL, file path, color, date,
//! markdown, then plain text. The categories overlap, so the order is part of
//! the contract: `https://x.com/a.png` is a URL (never a file path) and a
//! multi-line string whose last line ends in `dir/name.ext` is a file path
//! even when it also looks like markdown.

use super::{NodeKind, color, date};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Broad media family of a URL or file path, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum MediaCategory {
    Image,
    Audio,
    Video,
    Document,
    Generic,
}

/// Extension-derived refinement of a URL or file path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaType {
    pub category: MediaCategory,
    /// Lowercase extension without the dot.
    pub extension: String,
}

/// Refined type of a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Subtype {
    Object,
    Array,
    Null,
    Boolean,
    Integer,
    Float,
    Url(Option<MediaType>),
    FilePath(Option<MediaType>),
    Color,
    Date,
    Markdown,
    Text,
}

impl Subtype {
    /// Short base name of the subtype.
    pub fn name(&self) -> &'static str {
        match self {
            Subtype::Object => "object",
            Subtype::Array => "array",
            Subtype::Null => "null",
            Subtype::Boolean => "boolean",
            Subtype::Integer => "integer",
            Subtype::Float => "float",
            Subtype::Url(_) => "url",
            Subtype::FilePath(_) => "file",
            Subtype::Color => "color",
            Subtype::Date => "date",
            Subtype::Markdown => "markdown",
            Subtype::Text => "string",
        }
    }

    pub fn media(&self) -> Option<&MediaType> {
        match self {
            Subtype::Url(media) | Subtype::FilePath(media) => media.as_ref(),
            _ => None,
        }
    }
}

/// Kind plus subtype for one value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    pub kind: NodeKind,
    pub subtype: Subtype,
}

impl TypeInfo {
    /// Compound label such as `url→image→png`, `number→integer` or `object`.
    pub fn label(&self) -> String {
        match &self.subtype {
            Subtype::Url(Some(media)) | Subtype::FilePath(Some(media)) => format!(
                "{}→{}→{}",
                self.subtype.name(),
                media.category,
                media.extension
            ),
            Subtype::Integer | Subtype::Float => {
                format!("{}→{}", self.kind, self.subtype.name())
            }
            other => other.name().to_string(),
        }
    }
}

/// Classify a value. Pure and deterministic.
pub fn classify(value: &Value) -> TypeInfo {
    let kind = NodeKind::of(value);
    let subtype = match value {
        Value::Object(_) => Subtype::Object,
        Value::Array(_) => Subtype::Array,
        Value::Null => Subtype::Null,
        Value::Bool(_) => Subtype::Boolean,
        Value::Number(n) => {
            let integral = n.is_i64()
                || n.is_u64()
                || n.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0);
            if integral {
                Subtype::Integer
            } else {
                Subtype::Float
            }
        }
        Value::String(s) => classify_str(s),
    };
    TypeInfo { kind, subtype }
}

/// Refine a string value. The checks run in a fixed priority order.
pub fn classify_str(s: &str) -> Subtype {
    if is_url(s) {
        Subtype::Url(url_media(s))
    } else if is_file_path(s) {
        Subtype::FilePath(path_media(s))
    } else if color::is_color(s) {
        Subtype::Color
    } else if date::is_date(s) {
        Subtype::Date
    } else if is_markdown(s) {
        Subtype::Markdown
    } else {
        Subtype::Text
    }
}

pub fn is_url(s: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^https?://\S+$").unwrap())
        .is_match(s.trim())
}

pub fn is_file_path(s: &str) -> bool {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    let patterns = PATTERNS.get_or_init(|| {
        vec![
            // C:\dir or C:/dir
            Regex::new(r"^[A-Za-z]:[\\/]").unwrap(),
            // \\server\share
            Regex::new(r"^\\\\[^\\\s]+\\").unwrap(),
            // /usr/local/bin
            Regex::new(r"^/[^/\n][^\n]*$").unwrap(),
            // anything with a separator that ends in a short extension
            Regex::new(r"[\\/][^\n]*\.[A-Za-z0-9]{1,6}$").unwrap(),
        ]
    });
    patterns.iter().any(|re| re.is_match(s))
}

/// Markdown heuristic: weighted line indicators plus inline syntax counts.
pub fn is_markdown(s: &str) -> bool {
    s.chars().count() >= 20 && s.contains('\n') && markdown_score(s) >= 3
}

struct MarkdownPatterns {
    header: Regex,
    fence: Regex,
    rule: Regex,
    list_item: Regex,
    blockquote: Regex,
    table_separator: Regex,
    table_row: Regex,
    link: Regex,
    bold: Regex,
    inline_code: Regex,
}

fn markdown_patterns() -> &'static MarkdownPatterns {
    static PATTERNS: OnceLock<MarkdownPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| MarkdownPatterns {
        header: Regex::new(r"^#{1,6}\s+\S").unwrap(),
        fence: Regex::new(r"^\s*(```|~~~)").unwrap(),
        rule: Regex::new(r"^\s*(?:(?:\*\s*){3,}|(?:-\s*){3,}|(?:_\s*){3,})$").unwrap(),
        list_item: Regex::new(r"^\s*(?:[-*+]|\d+[.)])\s+\S").unwrap(),
        blockquote: Regex::new(r"^\s*>").unwrap(),
        table_separator: Regex::new(r"^\s*\|?\s*:?-{3,}:?\s*(?:\|\s*:?-{3,}:?\s*)+\|?\s*$")
            .unwrap(),
        table_row: Regex::new(r"^\s*\|.*\|\s*$").unwrap(),
        link: Regex::new(r"\[[^\]\n]+\]\([^)\n]+\)").unwrap(),
        bold: Regex::new(r"\*\*[^*\n]+\*\*|__[^_\n]+__").unwrap(),
        inline_code: Regex::new(r"`[^`\n]+`").unwrap(),
    })
}

/// Indicator score used by [`is_markdown`].
pub fn markdown_score(s: &str) -> usize {
    let p = markdown_patterns();
    let mut score = 0;

    for line in s.lines().take(30) {
        score += if p.header.is_match(line) {
            2
        } else if p.fence.is_match(line) {
            3
        } else if p.rule.is_match(line) {
            1
        } else if p.list_item.is_match(line) {
            1
        } else if p.blockquote.is_match(line) {
            1
        } else if p.table_separator.is_match(line) {
            2
        } else if p.table_row.is_match(line) {
            2
        } else {
            0
        };
    }

    score += p.link.find_iter(s).count();
    score += p.bold.find_iter(s).count();
    score += p.inline_code.find_iter(s).count() / 2;
    score
}

/// Map an extension to its media category.
pub fn media_category(extension: &str) -> Option<MediaCategory> {
    const IMAGE: &[&str] = &[
        "png", "jpg", "jpeg", "gif", "webp", "bmp", "svg", "ico", "tif", "tiff", "avif",
    ];
    const AUDIO: &[&str] = &["mp3", "wav", "ogg", "oga", "flac", "aac", "m4a", "opus"];
    const VIDEO: &[&str] = &["mp4", "webm", "mov", "avi", "mkv", "m4v", "ogv"];
    const DOCUMENT: &[&str] = &[
        "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "odt", "ods", "rtf", "txt", "md",
        "csv",
    ];
    const GENERIC: &[&str] = &[
        "json", "yaml", "yml", "toml", "xml", "html", "htm", "css", "js", "ts", "rs", "py",
        "sh", "log", "ini", "cfg", "conf", "zip", "tar", "gz",
    ];

    let ext = extension.to_ascii_lowercase();
    let tables = [
        (IMAGE, MediaCategory::Image),
        (AUDIO, MediaCategory::Audio),
        (VIDEO, MediaCategory::Video),
        (DOCUMENT, MediaCategory::Document),
        (GENERIC, MediaCategory::Generic),
    ];
    tables
        .iter()
        .find(|(table, _)| table.contains(&ext.as_str()))
        .map(|(_, category)| *category)
}

/// Trailing `.ext` of the last component of a path-like string.
pub fn extension_of(s: &str) -> Option<String> {
    let name = s.rsplit(['/', '\\']).next()?;
    let (stem, ext) = name.rsplit_once('.')?;
    let valid = !stem.is_empty()
        && (1..=6).contains(&ext.len())
        && ext.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then(|| ext.to_ascii_lowercase())
}

fn media_for(extension: Option<String>) -> Option<MediaType> {
    let extension = extension?;
    let category = media_category(&extension)?;
    Some(MediaType {
        category,
        extension,
    })
}

fn url_media(s: &str) -> Option<MediaType> {
    let path = match url::Url::parse(s.trim()) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => s.split(['?', '#']).next().unwrap_or(s).to_string(),
    };
    media_for(extension_of(&path))
}

fn path_media(s: &str) -> Option<MediaType> {
    media_for(extension_of(s.trim_end()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn subtype(s: &str) -> Subtype {
        classify_str(s)
    }

    #[test]
    fn test_url_before_file_path() {
        let info = classify(&json!("https://x.com/a.png"));
        assert_eq!(
            info.subtype,
            Subtype::Url(Some(MediaType {
                category: MediaCategory::Image,
                extension: "png".into()
            }))
        );
        assert_eq!(info.label(), "url→image→png");
        assert_eq!(subtype("http://example.com"), Subtype::Url(None));
        assert_eq!(
            subtype("https://cdn.site/song.MP3?x=1#t").media().map(|m| m.category),
            Some(MediaCategory::Audio)
        );
        assert_eq!(subtype("ftp://example.com/a.png").name(), "file");
    }

    #[test]
    fn test_file_paths() {
        let info = classify(&json!(r"C:\a\b.json"));
        assert_eq!(info.subtype.name(), "file");
        assert_eq!(info.subtype.media().unwrap().extension, "json");
        assert_eq!(info.label(), "file→generic→json");

        assert_eq!(subtype(r"\\server\share\x"), Subtype::FilePath(None));
        assert_eq!(subtype("/usr/local/bin"), Subtype::FilePath(None));
        assert_eq!(
            subtype("assets/photo.jpeg").media().map(|m| m.category),
            Some(MediaCategory::Image)
        );
        assert_eq!(subtype("notes.txt"), Subtype::Text);
        assert_eq!(subtype("a/b"), Subtype::Text);
    }

    #[test]
    fn test_colors() {
        assert_eq!(subtype("#fff"), Subtype::Color);
        assert_eq!(subtype("rgb(0, 0, 0)"), Subtype::Color);
        assert_eq!(subtype("teal"), Subtype::Color);
    }

    #[test]
    fn test_dates() {
        assert_eq!(subtype("2024-01-31"), Subtype::Date);
        assert_eq!(subtype("1/31/2024"), Subtype::Date);
        assert_eq!(subtype("2024-02-31"), Subtype::Text);
        assert_eq!(subtype("2024-01-31 release notes"), Subtype::Date);
    }

    #[test]
    fn test_markdown_with_headers_and_table() {
        let mut lines = vec![
            "# Title".to_string(),
            "Intro paragraph".to_string(),
            "## Details".to_string(),
            "| a | b |".to_string(),
            "| --- | --- |".to_string(),
            "| 1 | 2 |".to_string(),
        ];
        while lines.len() < 25 {
            lines.push("plain text line".to_string());
        }
        let text = lines.join("\n");
        assert_eq!(subtype(&text), Subtype::Markdown);
    }

    #[test]
    fn test_markdown_threshold() {
        // One list item and nothing else scores 1.
        assert_eq!(subtype("some words here\n- one item only"), Subtype::Text);
        // Too short even with strong indicators.
        assert_eq!(subtype("# a\n# b"), Subtype::Text);
        // Inline code counts half: four spans score 2, plus a list item.
        assert_eq!(
            subtype("use `a` and `b` or `c` and `d`\n- item"),
            Subtype::Markdown
        );
        assert_eq!(subtype("```\nlet x = 1;\n```\nthat's code"), Subtype::Markdown);
    }

    #[test]
    fn test_file_path_rule_claims_markdown_ending_in_path() {
        // Known heuristic limitation: the file path rule runs first.
        let text = "# Notes\n## More\n- see docs/readme.md";
        assert!(is_markdown(text));
        assert_eq!(subtype(text).name(), "file");
    }

    #[test]
    fn test_numbers_and_structure() {
        assert_eq!(classify(&json!(3)).label(), "number→integer");
        assert_eq!(classify(&json!(3.0)).subtype, Subtype::Integer);
        assert_eq!(classify(&json!(-2.5)).label(), "number→float");
        assert_eq!(classify(&json!({})).label(), "object");
        assert_eq!(classify(&json!([])).label(), "array");
        assert_eq!(classify(&json!(null)).label(), "null");
        assert_eq!(classify(&json!(true)).label(), "boolean");
        assert_eq!(classify(&json!("hello")).label(), "string");
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("a/b.JSON"), Some("json".into()));
        assert_eq!(extension_of("a/.bashrc"), None);
        assert_eq!(extension_of("a/b.toolongext"), None);
        assert_eq!(extension_of(r"C:\x\y.tar"), Some("tar".into()));
    }

    #[test]
    fn test_deterministic() {
        let value = json!("# Title\n\n- a\n- b\n**bold** text");
        assert_eq!(classify(&value), classify(&value));
    }
}
