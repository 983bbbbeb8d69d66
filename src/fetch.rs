use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::config::FetchConfig;
use crate::error::HubError;

/// Pure exponential backoff: 1s, 2s, 4s, ... for attempt index 0, 1, 2, ...
pub fn backoff(attempt: u32) -> Duration {
    Duration::from_secs(1u64 << attempt)
}

/// GET the page body, retrying on any network-level failure (timeout,
/// connection error, non-2xx status). The cancellation token is honored
/// before each attempt and during the backoff wait.
pub async fn fetch_page(
    url: &str,
    config: &FetchConfig,
    cancel: &CancellationToken,
) -> Result<String, HubError> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| HubError::Network {
            attempts: 0,
            cause: format!("client setup failed: {}", e),
        })?;

    let max_attempts = config.retries.max(1);
    let mut last_cause = String::new();

    for attempt in 0..max_attempts {
        if cancel.is_cancelled() {
            return Err(HubError::Cancelled);
        }

        let result = client.get(url).send().await.and_then(|r| r.error_for_status());
        match result {
            Ok(response) => match response.text().await {
                Ok(body) => return Ok(body),
                Err(e) => last_cause = e.to_string(),
            },
            Err(e) => last_cause = e.to_string(),
        }

        if attempt + 1 < max_attempts {
            let wait = backoff(attempt);
            warn!(
                "fetch attempt {}/{} failed ({}), retrying in {}s",
                attempt + 1,
                max_attempts,
                last_cause,
                wait.as_secs()
            );
            tokio::select! {
                _ = tokio::time::sleep(wait) => {}
                _ = cancel.cancelled() => return Err(HubError::Cancelled),
            }
        }
    }

    Err(HubError::Network {
        attempts: max_attempts,
        cause: last_cause,
    })
}

// ── Tests ──
