//! Diagnostic sink implementations.

mod journal;
mod memory;
mod tracing_sink;

pub use journal::JournalDiagnosticSink;
pub use memory::InMemoryDiagnosticSink;
pub use tracing_sink::TracingDiagnosticSink;
