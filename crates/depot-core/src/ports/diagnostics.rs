use crate::domain::DiagnosticEntry;

/// Write-only sink for operator diagnostics.
///
/// `record` cannot fail from the caller's point of view: an implementation
/// that cannot persist an entry reports that on stderr and drops it. When
/// `record` returns the entry must at least be queued for writing.
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, entry: DiagnosticEntry);
}
