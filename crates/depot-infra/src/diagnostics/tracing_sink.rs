//! Diagnostic sink that writes through `tracing`.

use depot_core::domain::DiagnosticEntry;
use depot_core::ports::DiagnosticSink;

/// Target of diagnostic events, so operators can route them separately.
pub const DIAGNOSTICS_TARGET: &str = "depot::diagnostics";

/// Emits one ERROR event per entry under [`DIAGNOSTICS_TARGET`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnosticSink;

impl DiagnosticSink for TracingDiagnosticSink {
    fn record(&self, entry: DiagnosticEntry) {
        tracing::error!(
            target: DIAGNOSTICS_TARGET,
            task_id = %entry.task_id,
            timestamp = %entry.timestamp.to_rfc3339(),
            code = %entry.code,
            error_kind = %entry.error_kind,
            raw_message = %entry.raw_message,
            cause_chain = ?entry.cause_chain,
            stack_trace = %entry.stack_trace,
            "Task failure diagnostics"
        );
    }
}
