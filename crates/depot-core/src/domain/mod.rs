//! Domain entities - the core business objects.

mod diagnostic;
mod failure;
mod task;

pub use diagnostic::DiagnosticEntry;
pub use failure::FailureRecord;
pub use task::{Task, TaskState};
