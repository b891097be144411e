use opscrew_core::{OpscrewError, OpscrewResult};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::info;

/// Streams entries from a source file into a target log at a fixed
/// interval, truncating the target first. Drives demos and the `watch`
/// loop with a steadily growing log.
pub struct LogFeeder {
    source: PathBuf,
    target: PathBuf,
    interval: Duration,
}

impl LogFeeder {
    pub fn new(source: PathBuf, target: PathBuf, interval: Duration) -> Self {
        Self {
            source,
            target,
            interval,
        }
    }

    /// Copies every source line to the target, one per interval.
    /// Returns the number of entries written.
    pub async fn run(&self) -> OpscrewResult<usize> {
        let content = match tokio::fs::read_to_string(&self.source).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(OpscrewError::ResourceNotFound(self.source.clone()));
            }
            Err(e) => return Err(e.into()),
        };

        // Start from a clean target so each seeding run is reproducible.
        tokio::fs::write(&self.target, "").await?;
        let mut target = tokio::fs::OpenOptions::new()
            .append(true)
            .open(&self.target)
            .await?;

        let total = content.lines().count();
        info!(
            source = %self.source.display(),
            target = %self.target.display(),
            total,
            "Log feeder started"
        );

        let mut written = 0;
        for line in content.lines() {
            if written > 0 {
                tokio::time::sleep(self.interval).await;
            }
            target.write_all(line.as_bytes()).await?;
            target.write_all(b"\n").await?;
            target.flush().await?;
            written += 1;
        }

        info!(written, "Log feeder finished");
        Ok(written)
    }
}
