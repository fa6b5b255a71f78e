//! Content download task.

use anyhow::Context;
use serde::Deserialize;

use depot_infra::{ExpectedContent, HttpDownloader};

#[derive(Debug, Deserialize)]
struct DownloadPayload {
    url: String,
    #[serde(default)]
    expected: ExpectedContent,
}

pub async fn run(downloader: HttpDownloader, payload: serde_json::Value) -> anyhow::Result<()> {
    let payload: DownloadPayload =
        serde_json::from_value(payload).context("Invalid download payload")?;

    let result = downloader.fetch(&payload.url, payload.expected).await?;
    tracing::info!(size = result.size, "Content downloaded");
    Ok(())
}
