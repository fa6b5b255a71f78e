//! In-memory diagnostic sink - used in tests and for local inspection.

use std::sync::{Mutex, PoisonError};

use uuid::Uuid;

use depot_core::domain::DiagnosticEntry;
use depot_core::ports::DiagnosticSink;

/// Keeps every entry in memory.
/// Note: Entries are lost on process restart.
#[derive(Default)]
pub struct InMemoryDiagnosticSink {
    entries: Mutex<Vec<DiagnosticEntry>>,
}

impl InMemoryDiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all entries in write order.
    pub fn entries(&self) -> Vec<DiagnosticEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn entries_for(&self, task_id: Uuid) -> Vec<DiagnosticEntry> {
        self.entries()
            .into_iter()
            .filter(|entry| entry.task_id == task_id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for InMemoryDiagnosticSink {
    fn record(&self, entry: DiagnosticEntry) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }
}
