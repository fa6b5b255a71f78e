//! Task handlers run by the queue workers.

mod download;

use depot_core::ports::TaskHandlers;
use depot_infra::HttpDownloader;

/// Kind of the content download task.
pub const DOWNLOAD: &str = "download";

/// Handlers for every task kind this server runs.
pub fn handlers(downloader: HttpDownloader) -> TaskHandlers {
    TaskHandlers::new().register(DOWNLOAD, move |payload| {
        download::run(downloader.clone(), payload)
    })
}
