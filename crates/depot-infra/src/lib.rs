//! # Depot Infrastructure
//!
//! Concrete implementations of the ports defined in `depot-core`.
//! This crate contains the diagnostic sinks, the in-memory task store and
//! queue, and the content download producer.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `download` - Download validation and the reqwest-based downloader

pub mod diagnostics;
pub mod jobs;
pub mod store;

#[cfg(feature = "download")]
pub mod download;

// Re-exports - In-Memory
pub use diagnostics::{InMemoryDiagnosticSink, JournalDiagnosticSink, TracingDiagnosticSink};
pub use jobs::{InMemoryTaskQueue, InMemoryTaskQueueConfig};
pub use store::InMemoryTaskRepository;

#[cfg(feature = "download")]
pub use download::{DownloadValidator, DownloaderConfig, ExpectedContent, HttpDownloader};
