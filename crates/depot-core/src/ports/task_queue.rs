//! Task queue port - abstraction over task queue backends.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Task;
use crate::error::DomainError;

/// A request to run one unit of work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRequest {
    /// Unique task identifier.
    pub id: Uuid,
    /// Task kind, used to route to a handler.
    pub kind: String,
    /// Handler-specific payload.
    pub payload: serde_json::Value,
    /// When the request was created.
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl TaskRequest {
    pub fn new(kind: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: kind.into(),
            payload,
            created_at: chrono::Utc::now(),
        }
    }
}

/// A unit of work for one task kind.
pub type TaskHandler =
    Arc<dyn Fn(serde_json::Value) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

/// Handlers by task kind.
#[derive(Clone, Default)]
pub struct TaskHandlers {
    handlers: HashMap<String, TaskHandler>,
}

impl TaskHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F, Fut>(mut self, kind: impl Into<String>, handler: F) -> Self
    where
        F: Fn(serde_json::Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let handler: TaskHandler = Arc::new(move |payload| handler(payload).boxed());
        self.handlers.insert(kind.into(), handler);
        self
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Build the unit of work for a request. Unknown kinds fail with
    /// `MissingPlugin` once the work runs.
    pub fn dispatch(&self, request: &TaskRequest) -> BoxFuture<'static, anyhow::Result<()>> {
        match self.handlers.get(&request.kind) {
            Some(handler) => handler(request.payload.clone()),
            None => {
                let err = anyhow::Error::new(DomainError::MissingPlugin {
                    plugin_label: request.kind.clone(),
                });
                async move { anyhow::Result::<()>::Err(err) }.boxed()
            }
        }
    }
}

/// Task queue trait - abstraction over task queue backends.
#[async_trait]
pub trait TaskQueue: Send + Sync {
    /// Enqueue a request; returns the waiting task.
    async fn enqueue(&self, request: TaskRequest) -> Result<Task, TaskQueueError>;

    /// Start processing requests with the given handlers.
    async fn start_worker(&self, handlers: TaskHandlers) -> Result<(), TaskQueueError>;

    /// Get queue statistics.
    async fn stats(&self) -> Result<QueueStats, TaskQueueError>;
}

/// Queue statistics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QueueStats {
    pub pending: usize,
    pub processing: usize,
    pub completed: usize,
    pub failed: usize,
}

/// Task queue errors.
#[derive(Debug, thiserror::Error)]
pub enum TaskQueueError {
    #[error("Failed to enqueue task: {0}")]
    EnqueueError(String),

    #[error("Queue is full")]
    QueueFull,

    #[error("Workers already started")]
    AlreadyStarted,

    #[error("Backend error: {0}")]
    Backend(String),
}
