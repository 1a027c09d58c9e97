//! External collaborators: clipboard, launcher, file system and saving.
//!
//! The navigator only talks to these through the [`Host`] and [`FileProbe`]
//! traits, so everything above them can be tested without a desktop.

use crate::document::{MediaCategory, classify};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),
    #[error("Clipboard not available")]
    NoClipboard,
    #[error("Failed to open {target}: {source}")]
    Open {
        target: String,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to save file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Side-effecting operations the session can ask for.
pub trait Host {
    fn copy_to_clipboard(&mut self, text: &str) -> Result<(), HostError>;
    fn open_external_url(&mut self, url: &str) -> Result<(), HostError>;
    fn open_path_in_shell(&mut self, path: &str) -> Result<(), HostError>;
    /// Write `content` under a name derived from `suggested_name`; returns where it landed.
    fn save_file(&mut self, content: &str, suggested_name: &str) -> Result<PathBuf, HostError>;
}

/// Metadata of an existing path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathStatus {
    pub is_dir: bool,
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
}

/// Size caps for preview reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadLimits {
    /// Text beyond this is cut off and marked truncated.
    pub max_text_bytes: u64,
    /// Media beyond this is rejected without decoding.
    pub max_media_bytes: u64,
}

impl Default for ReadLimits {
    fn default() -> Self {
        Self {
            max_text_bytes: 64 * 1024,
            max_media_bytes: 20 * 1024 * 1024,
        }
    }
}

/// Result of reading a file for preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FilePreview {
    Text {
        content: String,
        truncated: bool,
        total_bytes: u64,
    },
    Image {
        width: u32,
        height: u32,
        format: String,
        bytes: u64,
    },
    Audio {
        format: String,
        bytes: u64,
    },
    Unknown {
        bytes: u64,
    },
    Error {
        message: String,
    },
}

/// File-system queries. Called from the preview worker thread.
pub trait FileProbe: Send + Sync {
    /// `Ok(None)` when nothing exists at `path`.
    fn check_path(&self, path: &Path) -> Result<Option<PathStatus>, HostError>;
    /// Never fails: problems come back as [`FilePreview::Error`].
    fn read_file_for_preview(&self, path: &Path, limits: ReadLimits) -> FilePreview;
}

/// The real file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbe;

impl FileProbe for SystemProbe {
    fn check_path(&self, path: &Path) -> Result<Option<PathStatus>, HostError> {
        match std::fs::metadata(path) {
            Ok(meta) => Ok(Some(PathStatus {
                is_dir: meta.is_dir(),
                size: meta.len(),
                modified: meta.modified().ok().map(DateTime::<Utc>::from),
            })),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn read_file_for_preview(&self, path: &Path, limits: ReadLimits) -> FilePreview {
        read_preview(path, limits).unwrap_or_else(|e| FilePreview::Error {
            message: e.to_string(),
        })
    }
}

fn read_preview(path: &Path, limits: ReadLimits) -> Result<FilePreview, HostError> {
    let bytes = std::fs::metadata(path)?.len();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match classify::media_category(&extension) {
        Some(MediaCategory::Image) | Some(MediaCategory::Audio)
            if bytes > limits.max_media_bytes =>
        {
            Ok(FilePreview::Error {
                message: format!(
                    "File too large to preview ({} > {} bytes)",
                    bytes, limits.max_media_bytes
                ),
            })
        }
        Some(MediaCategory::Image) => {
            let reader = image::ImageReader::open(path)?.with_guessed_format()?;
            let format = reader
                .format()
                .map(|f| format!("{:?}", f).to_lowercase())
                .unwrap_or(extension);
            match reader.into_dimensions() {
                Ok((width, height)) => Ok(FilePreview::Image {
                    width,
                    height,
                    format,
                    bytes,
                }),
                Err(e) => Ok(FilePreview::Error {
                    message: format!("Unreadable image: {}", e),
                }),
            }
        }
        Some(MediaCategory::Audio) => Ok(FilePreview::Audio {
            format: extension,
            bytes,
        }),
        Some(MediaCategory::Video) => Ok(FilePreview::Unknown { bytes }),
        _ => read_text(path, bytes, limits.max_text_bytes),
    }
}

fn read_text(path: &Path, total_bytes: u64, max_bytes: u64) -> Result<FilePreview, HostError> {
    let mut buf = Vec::new();
    File::open(path)?.take(max_bytes).read_to_end(&mut buf)?;
    if buf.contains(&0) {
        return Ok(FilePreview::Unknown { bytes: total_bytes });
    }

    let truncated = total_bytes > buf.len() as u64;
    let content = match std::str::from_utf8(&buf) {
        Ok(text) => text.to_string(),
        // a multi-byte char cut at the limit
        Err(e) if truncated && e.error_len().is_none() => {
            String::from_utf8_lossy(&buf[..e.valid_up_to()]).into_owned()
        }
        Err(_) => return Ok(FilePreview::Unknown { bytes: total_bytes }),
    };
    Ok(FilePreview::Text {
        content,
        truncated,
        total_bytes,
    })
}

/// Desktop host backed by `arboard`, `open` and the file system.
pub struct SystemHost {
    // On Linux the clipboard owner must stay alive to serve paste requests
    clipboard: Option<arboard::Clipboard>,
    save_dir: PathBuf,
}

impl SystemHost {
    pub fn new(save_dir: PathBuf) -> Self {
        Self {
            clipboard: arboard::Clipboard::new().ok(),
            save_dir,
        }
    }
}

impl Host for SystemHost {
    fn copy_to_clipboard(&mut self, text: &str) -> Result<(), HostError> {
        let clipboard = self.clipboard.as_mut().ok_or(HostError::NoClipboard)?;
        clipboard.set_text(text.to_string())?;
        Ok(())
    }

    fn open_external_url(&mut self, url: &str) -> Result<(), HostError> {
        open::that(url).map_err(|source| HostError::Open {
            target: url.to_string(),
            source,
        })
    }

    fn open_path_in_shell(&mut self, path: &str) -> Result<(), HostError> {
        open::that(path).map_err(|source| HostError::Open {
            target: path.to_string(),
            source,
        })
    }

    fn save_file(&mut self, content: &str, suggested_name: &str) -> Result<PathBuf, HostError> {
        let name = sanitize_file_name(suggested_name);
        match write_atomic(&self.save_dir, &name, content) {
            Ok(path) => Ok(path),
            Err(e) => {
                tracing::warn!(dir = %self.save_dir.display(), error = %e, "save failed, using temp dir");
                write_atomic(&std::env::temp_dir(), &name, content)
            }
        }
    }
}

/// Write `content` to `dir/name` through a temp file and rename.
/// An existing file gets a numeric suffix instead of being replaced.
pub fn write_atomic(dir: &Path, name: &str, content: &str) -> Result<PathBuf, HostError> {
    let target = unique_path(dir, name);
    let mut temp_file = tempfile::NamedTempFile::new_in(dir)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.flush()?;
    temp_file.persist_noclobber(&target)?;
    Ok(target)
}

fn unique_path(dir: &Path, name: &str) -> PathBuf {
    let candidate = dir.join(name);
    if !candidate.exists() {
        return candidate;
    }
    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, format!(".{}", ext)),
        _ => (name, String::new()),
    };
    (1..)
        .map(|n| dir.join(format!("{}-{}{}", stem, n, ext)))
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

/// Keep a suggested name to one safe path component.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '[' | ']' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let cleaned = cleaned.trim_matches(['.', ' ', '_']);
    if cleaned.is_empty() {
        "document.json".to_string()
    } else {
        cleaned.to_string()
    }
}

/// How a piece of text reached the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Copied,
    /// Clipboard failed; the text was saved here instead.
    Saved(PathBuf),
    Failed(String),
}

/// Copy `text`, falling back to saving it as `fallback_name`.
pub fn deliver_text(host: &mut dyn Host, text: &str, fallback_name: &str) -> Delivery {
    match host.copy_to_clipboard(text) {
        Ok(()) => Delivery::Copied,
        Err(clipboard_err) => {
            tracing::warn!(error = %clipboard_err, "clipboard failed, saving instead");
            match host.save_file(text, fallback_name) {
                Ok(path) => Delivery::Saved(path),
                Err(save_err) => Delivery::Failed(format!("{}; {}", clipboard_err, save_err)),
            }
        }
    }
}

/// Terminal result of a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Outcome {
    /// Set only when the session ended through the select action.
    pub selected: Option<Value>,
}
