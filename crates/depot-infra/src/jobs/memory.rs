//! In-memory task queue implementation.
//!
//! Requests are held in memory and run by local workers, each run wrapped
//! in the task failure boundary. Failed tasks are not retried.
//! Note: Queued requests are lost on server restart.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc};

use depot_core::TaskBoundary;
use depot_core::domain::Task;
use depot_core::ports::{
    QueueStats, TaskHandlers, TaskQueue, TaskQueueError, TaskRepository, TaskRequest,
};

/// In-memory task queue configuration.
#[derive(Debug, Clone)]
pub struct InMemoryTaskQueueConfig {
    /// Maximum queue size (0 = unlimited).
    pub max_size: usize,
    /// Number of worker tasks.
    pub workers: usize,
}

impl Default for InMemoryTaskQueueConfig {
    fn default() -> Self {
        Self {
            max_size: 10000,
            workers: 4,
        }
    }
}

impl InMemoryTaskQueueConfig {
    pub fn from_env() -> Self {
        Self {
            max_size: std::env::var("TASK_QUEUE_MAX_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10000),
            workers: std::env::var("TASK_QUEUE_WORKERS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(4),
        }
    }
}

/// In-memory task queue.
pub struct InMemoryTaskQueue {
    stats: Arc<QueueCounters>,
    config: InMemoryTaskQueueConfig,
    boundary: TaskBoundary,
    tasks: Arc<dyn TaskRepository>,
    started: AtomicBool,
    sender: mpsc::Sender<TaskRequest>,
    receiver: Arc<Mutex<mpsc::Receiver<TaskRequest>>>,
}

#[derive(Default)]
struct QueueCounters {
    pending: AtomicUsize,
    processing: AtomicUsize,
    completed: AtomicUsize,
    failed: AtomicUsize,
}

impl InMemoryTaskQueue {
    pub fn new(
        config: InMemoryTaskQueueConfig,
        boundary: TaskBoundary,
        tasks: Arc<dyn TaskRepository>,
    ) -> Self {
        let (tx, rx) = mpsc::channel(config.max_size.max(100));

        Self {
            stats: Arc::new(QueueCounters::default()),
            config,
            boundary,
            tasks,
            started: AtomicBool::new(false),
            sender: tx,
            receiver: Arc::new(Mutex::new(rx)),
        }
    }
}

#[async_trait]
impl TaskQueue for InMemoryTaskQueue {
    async fn enqueue(&self, request: TaskRequest) -> Result<Task, TaskQueueError> {
        // Check queue size
        if self.config.max_size > 0 {
            let current_size = self.stats.pending.load(Ordering::Relaxed);
            if current_size >= self.config.max_size {
                return Err(TaskQueueError::QueueFull);
            }
        }

        let task = self
            .tasks
            .save(Task::with_id(request.id, request.kind.clone()))
            .await
            .map_err(|e| TaskQueueError::Backend(e.to_string()))?;

        self.stats.pending.fetch_add(1, Ordering::Relaxed);

        if let Err(e) = self.sender.send(request).await {
            self.stats.pending.fetch_sub(1, Ordering::Relaxed);
            return Err(TaskQueueError::EnqueueError(e.to_string()));
        }

        tracing::debug!(
            task_id = %task.id,
            "Task enqueued. Queue size: {}",
            self.stats.pending.load(Ordering::Relaxed)
        );

        Ok(task)
    }

    async fn start_worker(&self, handlers: TaskHandlers) -> Result<(), TaskQueueError> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(TaskQueueError::AlreadyStarted);
        }

        let handlers = Arc::new(handlers);

        for worker_id in 0..self.config.workers {
            let handlers = handlers.clone();
            let receiver = self.receiver.clone();
            let stats = self.stats.clone();
            let boundary = self.boundary.clone();
            let tasks = self.tasks.clone();

            tokio::spawn(async move {
                tracing::info!("Task worker {} started", worker_id);

                loop {
                    let request = {
                        let mut rx = receiver.lock().await;
                        rx.recv().await
                    };

                    let Some(request) = request else {
                        tracing::info!("Task worker {} shutting down", worker_id);
                        break;
                    };

                    stats.pending.fetch_sub(1, Ordering::Relaxed);
                    stats.processing.fetch_add(1, Ordering::Relaxed);

                    tracing::debug!(
                        worker = worker_id,
                        task_id = %request.id,
                        kind = %request.kind,
                        "Processing task"
                    );

                    let mut task = match tasks.find_by_id(request.id).await {
                        Ok(Some(task)) => task,
                        Ok(None) => Task::with_id(request.id, request.kind.clone()),
                        Err(e) => {
                            tracing::warn!(task_id = %request.id, "Failed to load task: {}", e);
                            Task::with_id(request.id, request.kind.clone())
                        }
                    };

                    task.mark_running();
                    if let Err(e) = tasks.save(task.clone()).await {
                        tracing::warn!(task_id = %request.id, "Failed to store running task: {}", e);
                    }

                    let work = handlers.dispatch(&request);
                    let outcome = boundary.execute(&mut task, work).await;

                    stats.processing.fetch_sub(1, Ordering::Relaxed);
                    match outcome {
                        Ok(()) => {
                            stats.completed.fetch_add(1, Ordering::Relaxed);
                        }
                        Err(_) => {
                            stats.failed.fetch_add(1, Ordering::Relaxed);
                        }
                    }

                    if let Err(e) = tasks.save(task).await {
                        tracing::error!(task_id = %request.id, "Failed to store task result: {}", e);
                    }
                }
            });
        }

        Ok(())
    }

    async fn stats(&self) -> Result<QueueStats, TaskQueueError> {
        Ok(QueueStats {
            pending: self.stats.pending.load(Ordering::Relaxed),
            processing: self.stats.processing.load(Ordering::Relaxed),
            completed: self.stats.completed.load(Ordering::Relaxed),
            failed: self.stats.failed.load(Ordering::Relaxed),
        })
    }
}
