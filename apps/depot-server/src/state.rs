//! Application state - shared across all handlers.

use std::sync::Arc;

use anyhow::Context;

use depot_core::TaskBoundary;
use depot_core::error::ErrorRegistry;
use depot_core::ports::{DiagnosticSink, TaskQueue, TaskRepository};
use depot_infra::{
    HttpDownloader, InMemoryTaskQueue, InMemoryTaskRepository, JournalDiagnosticSink,
    TracingDiagnosticSink,
};

use crate::background;
use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub queue: Arc<dyn TaskQueue>,
    pub tasks: Arc<dyn TaskRepository>,
    pub registry: Arc<ErrorRegistry>,
}

impl AppState {
    /// Wire the boundary, store and queue, and start the workers.
    pub async fn new(config: &AppConfig, registry: Arc<ErrorRegistry>) -> anyhow::Result<Self> {
        let diagnostics: Arc<dyn DiagnosticSink> = match &config.diagnostics_path {
            Some(path) => Arc::new(JournalDiagnosticSink::open(path).await.with_context(
                || format!("Failed to open diagnostic journal {}", path.display()),
            )?),
            None => {
                tracing::info!("DIAGNOSTICS_PATH not set. Diagnostics go to the log.");
                Arc::new(TracingDiagnosticSink)
            }
        };

        let boundary = TaskBoundary::new(registry.clone(), diagnostics);
        let tasks: Arc<dyn TaskRepository> = Arc::new(InMemoryTaskRepository::new());
        let queue: Arc<dyn TaskQueue> = Arc::new(InMemoryTaskQueue::new(
            config.queue.clone(),
            boundary,
            tasks.clone(),
        ));

        let downloader = HttpDownloader::new(config.downloader.clone())?;
        queue.start_worker(background::handlers(downloader)).await?;

        tracing::info!("Application state initialized");

        Ok(Self {
            queue,
            tasks,
            registry,
        })
    }
}
