//! JSON-lines diagnostic journal.
//!
//! Each entry is appended to the journal file inside `record`, so it is on
//! disk before the boundary reports the failure. Write failures are reported
//! on stderr and the entry is dropped; they never reach the task that failed.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tokio::fs::OpenOptions;

use depot_core::domain::DiagnosticEntry;
use depot_core::ports::DiagnosticSink;

/// Appends entries to a file, one JSON document per line.
pub struct JournalDiagnosticSink {
    file: Mutex<File>,
    path: PathBuf,
}

impl JournalDiagnosticSink {
    /// Open (or create) the journal in append mode.
    pub async fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?
            .into_std()
            .await;

        tracing::info!(path = %path.display(), "Diagnostic journal opened");
        Ok(Self {
            file: Mutex::new(file),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ask the OS to push written entries to the storage device.
    pub fn sync(&self) -> std::io::Result<()> {
        self.file
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .sync_data()
    }
}

impl DiagnosticSink for JournalDiagnosticSink {
    fn record(&self, entry: DiagnosticEntry) {
        let mut line = match serde_json::to_vec(&entry) {
            Ok(line) => line,
            Err(e) => {
                eprintln!(
                    "Failed to encode diagnostics for task {}: {}",
                    entry.task_id, e
                );
                return;
            }
        };
        line.push(b'\n');

        // One write per line keeps concurrent entries from interleaving.
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = file.write_all(&line) {
            eprintln!(
                "Failed to write diagnostics for task {} to {}: {}",
                entry.task_id,
                self.path.display(),
                e
            );
        }
    }
}
