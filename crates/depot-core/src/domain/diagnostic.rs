use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Operator-only record of a task failure.
///
/// Carries the original error verbatim. It is written to a diagnostic sink
/// and must never be serialized into an API response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticEntry {
    pub task_id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// Code of the failure record this entry accompanies.
    pub code: String,
    /// Descriptor name for domain errors, `panic` or `ProgrammingError` otherwise.
    pub error_kind: String,
    pub raw_message: String,
    pub stack_trace: String,
    /// Messages of the error and its sources, outermost first.
    pub cause_chain: Vec<String>,
}
