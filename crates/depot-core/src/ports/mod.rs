//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod diagnostics;
mod repository;
mod task_queue;

pub use diagnostics::DiagnosticSink;
pub use repository::TaskRepository;
pub use task_queue::{QueueStats, TaskHandler, TaskHandlers, TaskQueue, TaskQueueError, TaskRequest};
