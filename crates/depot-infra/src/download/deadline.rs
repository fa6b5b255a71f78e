use std::future::Future;
use std::time::Duration;

use depot_core::DomainError;

use super::location::redact_url;

/// Run `operation`, failing with a timeout error for `url` once `deadline`
/// has elapsed.
pub async fn with_deadline<T, F>(url: &str, deadline: Duration, operation: F) -> anyhow::Result<T>
where
    F: Future<Output = anyhow::Result<T>>,
{
    match tokio::time::timeout(deadline, operation).await {
        Ok(result) => result,
        Err(_) => {
            tracing::debug!(url = %redact_url(url), ?deadline, "Download deadline elapsed");
            Err(DomainError::Timeout {
                url: redact_url(url),
            }
            .into())
        }
    }
}
