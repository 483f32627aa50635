//! Raw response capture for offline inspection.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Receives raw response bodies when response capture is enabled.
pub trait DiagnosticSink: Send + Sync + fmt::Debug {
    /// Persist `body`. Must not fail the request it came from.
    fn capture(&self, body: &[u8]);
}

/// Sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn capture(&self, _body: &[u8]) {}
}

/// Writes each body to `<dir>/<UTC timestamp>-<seq>.json`.
#[derive(Debug)]
pub struct FileDumpSink {
    dir: PathBuf,
    seq: AtomicU64,
}

impl FileDumpSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            seq: AtomicU64::new(0),
        }
    }

    /// Directory the dumps are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn next_path(&self) -> PathBuf {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%S%.3fZ");
        self.dir.join(format!("{}-{:04}.json", stamp, seq))
    }
}

impl DiagnosticSink for FileDumpSink {
    fn capture(&self, body: &[u8]) {
        if let Err(e) = std::fs::create_dir_all(&self.dir) {
            tracing::warn!(dir = %self.dir.display(), error = %e, "failed to create dump directory");
            return;
        }

        let path = self.next_path();
        match std::fs::write(&path, body) {
            Ok(()) => tracing::debug!(path = %path.display(), bytes = body.len(), "saved response body"),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to save response body")
            }
        }
    }
}
