//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use depot_infra::{DownloaderConfig, InMemoryTaskQueueConfig};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Diagnostic journal file; diagnostics go to the log when unset.
    pub diagnostics_path: Option<PathBuf>,
    pub queue: InMemoryTaskQueueConfig,
    pub downloader: DownloaderConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            diagnostics_path: env::var("DIAGNOSTICS_PATH")
                .ok()
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            queue: InMemoryTaskQueueConfig::from_env(),
            downloader: DownloaderConfig::from_env(),
        }
    }
}
