//! File queries for previews, run off the event loop.
//!
//! The event loop sends a path to the [`QueryWorker`], keeps handling input,
//! and later drains finished results into the session's [`QueryCache`].
//! Results are cached even if the user has moved on; the preview for the
//! current selection reads the cache, so a late answer for another path is
//! stored but never shown.

use crate::host::{FilePreview, FileProbe, PathStatus, ReadLimits};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

/// Outcome of querying one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryResult {
    /// Nothing exists at the path (or the check failed).
    Missing,
    Directory(PathStatus),
    File {
        status: PathStatus,
        content: FilePreview,
    },
}

impl QueryResult {
    pub fn exists(&self) -> bool {
        !matches!(self, QueryResult::Missing)
    }

    pub fn status(&self) -> Option<&PathStatus> {
        match self {
            QueryResult::Missing => None,
            QueryResult::Directory(status) | QueryResult::File { status, .. } => Some(status),
        }
    }
}

/// Check a path and, for existing non-directories, read it for preview.
pub fn run_query(probe: &dyn FileProbe, path: &str, limits: ReadLimits) -> QueryResult {
    let target = Path::new(path);
    match probe.check_path(target) {
        Ok(Some(status)) if status.is_dir => QueryResult::Directory(status),
        Ok(Some(status)) => QueryResult::File {
            content: probe.read_file_for_preview(target, limits),
            status,
        },
        Ok(None) => QueryResult::Missing,
        Err(e) => {
            tracing::debug!(path = %path, error = %e, "path check failed");
            QueryResult::Missing
        }
    }
}

/// Session-lifetime cache of query results. Entries are never invalidated.
#[derive(Debug, Clone, Default)]
pub struct QueryCache {
    entries: HashMap<String, QueryResult>,
    pending: HashSet<String>,
}

impl QueryCache {
    pub fn get(&self, key: &str) -> Option<&QueryResult> {
        self.entries.get(key)
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.pending.contains(key)
    }

    /// Mark `key` as in flight. `false` if it is already cached or pending.
    pub fn begin(&mut self, key: &str) -> bool {
        if self.entries.contains_key(key) || self.pending.contains(key) {
            return false;
        }
        self.pending.insert(key.to_string());
        true
    }

    /// Store a finished result, whether or not anyone still wants it.
    pub fn complete(&mut self, key: String, result: QueryResult) {
        self.pending.remove(&key);
        self.entries.insert(key, result);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Background thread answering path queries in request order.
pub struct QueryWorker {
    requests: Sender<String>,
    results: Receiver<(String, QueryResult)>,
    _handle: JoinHandle<()>,
}

impl QueryWorker {
    pub fn spawn(probe: Arc<dyn FileProbe>, limits: ReadLimits) -> Self {
        let (request_tx, request_rx) = mpsc::channel::<String>();
        let (result_tx, result_rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            // Exits when the worker (and its sender) is dropped
            while let Ok(path) = request_rx.recv() {
                let result = run_query(probe.as_ref(), &path, limits);
                tracing::debug!(path = %path, exists = result.exists(), "query finished");
                if result_tx.send((path, result)).is_err() {
                    break;
                }
            }
        });

        Self {
            requests: request_tx,
            results: result_rx,
            _handle: handle,
        }
    }

    /// Queue a query. `false` if the worker thread is gone.
    pub fn request(&self, path: &str) -> bool {
        tracing::debug!(path = %path, "query dispatched");
        self.requests.send(path.to_string()).is_ok()
    }

    /// Next finished result, without blocking.
    pub fn try_recv(&self) -> Option<(String, QueryResult)> {
        match self.results.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Move every finished result into `cache`. Returns how many arrived.
    pub fn drain_into(&self, cache: &mut QueryCache) -> usize {
        let mut count = 0;
        while let Some((key, result)) = self.try_recv() {
            cache.complete(key, result);
            count += 1;
        }
        count
    }
}
