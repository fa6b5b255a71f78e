//! Task failure boundary.
//!
//! Runs a unit of work and turns whatever it raises, an error or a panic,
//! into a sanitized [`FailureRecord`]. The full error goes to the
//! [`DiagnosticSink`] before the record is handed back to the caller.

use std::any::Any;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::cell::RefCell;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Once};

use chrono::Utc;
use futures::FutureExt;
use uuid::Uuid;

use crate::domain::{DiagnosticEntry, FailureRecord, Task};
use crate::error::{DomainError, ErrorRegistry};
use crate::ports::DiagnosticSink;

/// `error_kind` of anything that is not a domain error.
pub const PROGRAMMING_ERROR: &str = "ProgrammingError";

/// `error_kind` of a caught panic.
pub const PANIC: &str = "panic";

/// What a unit of work raised.
enum Raised {
    Error(anyhow::Error),
    Panic {
        message: String,
        stack_trace: Option<String>,
    },
}

/// Wraps the execution of units of work.
///
/// Holds no per-task state; one boundary is shared by every worker.
#[derive(Clone)]
pub struct TaskBoundary {
    registry: Arc<ErrorRegistry>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl TaskBoundary {
    pub fn new(registry: Arc<ErrorRegistry>, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        install_panic_capture();
        Self {
            registry,
            diagnostics,
        }
    }

    pub fn registry(&self) -> &ErrorRegistry {
        &self.registry
    }

    /// Run `work` for `task`.
    ///
    /// On success the task is marked completed and the value returned. On
    /// failure exactly one diagnostic entry is recorded, then the task is
    /// marked failed with the returned record attached.
    pub async fn execute<T, F>(&self, task: &mut Task, work: F) -> Result<T, FailureRecord>
    where
        F: Future<Output = anyhow::Result<T>>,
    {
        task.mark_running();
        tracing::debug!(task_id = %task.id, task_name = %task.name, "Task started");

        // A panic resumed with `resume_unwind` skips the hook, so a trace
        // left over from an earlier panic on this thread must not be picked up.
        let mut work = Box::pin(work);
        let work = futures::future::poll_fn(move |cx| {
            clear_panic_trace();
            work.as_mut().poll(cx)
        });

        let raised = match AssertUnwindSafe(work).catch_unwind().await {
            Ok(Ok(value)) => {
                task.mark_completed();
                tracing::debug!(task_id = %task.id, "Task completed");
                return Ok(value);
            }
            Ok(Err(err)) => Raised::Error(err),
            Err(payload) => Raised::Panic {
                message: panic_message(payload.as_ref()),
                stack_trace: take_panic_trace(),
            },
        };

        let record = self.fail(task.id, raised);
        task.mark_failed(record.clone());
        Err(record)
    }

    /// The domain error `err` is reported as, if any.
    ///
    /// A domain error whose descriptor is not the one registered for its
    /// code is treated like any other unclassified error.
    pub fn classify<'e>(&self, err: &'e anyhow::Error) -> Option<&'e DomainError> {
        err.downcast_ref::<DomainError>()
            .filter(|domain| self.registry.is_registered(domain.descriptor()))
    }

    /// Sanitized record for `err`. Never fails.
    pub fn failure_record(&self, err: &anyhow::Error) -> FailureRecord {
        self.classify(err)
            .map(FailureRecord::from)
            .unwrap_or_else(FailureRecord::internal)
    }

    fn fail(&self, task_id: Uuid, raised: Raised) -> FailureRecord {
        let (record, entry) = match raised {
            Raised::Error(err) => {
                let record = self.failure_record(&err);
                let error_kind = match err.downcast_ref::<DomainError>() {
                    Some(domain) => domain.descriptor().name.to_string(),
                    None => PROGRAMMING_ERROR.to_string(),
                };

                if record.is_internal() {
                    tracing::error!(
                        task_id = %task_id,
                        code = %record.code,
                        error_kind = %error_kind,
                        "Task failed with an unexpected error"
                    );
                } else {
                    tracing::warn!(
                        task_id = %task_id,
                        code = %record.code,
                        description = %record.description,
                        "Task failed"
                    );
                }

                let entry = DiagnosticEntry {
                    task_id,
                    timestamp: Utc::now(),
                    code: record.code.clone(),
                    error_kind,
                    raw_message: err.to_string(),
                    stack_trace: error_trace(&err),
                    cause_chain: err.chain().map(ToString::to_string).collect(),
                };
                (record, entry)
            }
            Raised::Panic {
                message,
                stack_trace,
            } => {
                let record = FailureRecord::internal();
                tracing::error!(task_id = %task_id, code = %record.code, "Task panicked");

                let entry = DiagnosticEntry {
                    task_id,
                    timestamp: Utc::now(),
                    code: record.code.clone(),
                    error_kind: PANIC.to_string(),
                    raw_message: message.clone(),
                    stack_trace: stack_trace
                        .unwrap_or_else(|| Backtrace::force_capture().to_string()),
                    cause_chain: vec![message],
                };
                (record, entry)
            }
        };

        // Diagnostics first: a reported failure always has its detail on record.
        self.diagnostics.record(entry);
        record
    }
}

/// Backtrace of `err` if one was captured where it was raised, otherwise
/// the boundary's own.
fn error_trace(err: &anyhow::Error) -> String {
    let backtrace = err.backtrace();
    match backtrace.status() {
        BacktraceStatus::Captured => backtrace.to_string(),
        _ => Backtrace::force_capture().to_string(),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "Box<dyn Any>".to_string()
    }
}

thread_local! {
    static PANIC_TRACE: RefCell<Option<String>> = const { RefCell::new(None) };
}

static PANIC_HOOK: Once = Once::new();

/// Chain a panic hook that keeps the panic-site backtrace for the thread.
/// A caught panic is read back on the same thread that polled the work.
fn install_panic_capture() {
    PANIC_HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let trace = Backtrace::force_capture().to_string();
            PANIC_TRACE.with(|slot| *slot.borrow_mut() = Some(trace));
            previous(info);
        }));
    });
}

fn clear_panic_trace() {
    PANIC_TRACE.with(|slot| slot.borrow_mut().take());
}

fn take_panic_trace() -> Option<String> {
    PANIC_TRACE.with(|slot| slot.borrow_mut().take())
}
