use std::path::{Path, PathBuf};

/// Size-based change detector for the watched log file.
///
/// A missing file reads as size zero, so deleting and re-creating the log
/// registers as changes too. The first poll always reports a change,
/// which gives `watch` an initial run on startup.
pub struct LogWatcher {
    path: PathBuf,
    last_size: Option<u64>,
}

impl LogWatcher {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            last_size: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records a size observation and reports whether it differs from the
    /// previous one.
    pub fn observe(&mut self, size: u64) -> bool {
        let changed = self.last_size != Some(size);
        self.last_size = Some(size);
        changed
    }

    /// Reads the current file size and returns `Some(size)` when it
    /// changed since the last poll.
    pub async fn poll(&mut self) -> Option<u64> {
        let size = tokio::fs::metadata(&self.path)
            .await
            .map(|m| m.len())
            .unwrap_or(0);
        self.observe(size).then_some(size)
    }
}
