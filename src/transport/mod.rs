//! HTTP Transport
//!
//! A small wrapper around `reqwest::Client` shared by the index client and the
//! document-store client.
//!
//! Every request is bounded by a per-attempt timeout. Connection-level failures
//! are retried with exponential backoff plus random jitter; HTTP status codes are
//! returned untouched so callers can decide what a 404 or a 5xx means for them.

use anyhow::Result;
use serde::Serialize;
use std::time::Duration;

/// Delay before the first retry.
const INITIAL_BACKOFF_MS: u64 = 150;
/// Upper bound for the doubling backoff.
const MAX_BACKOFF_MS: u64 = 1200;

#[derive(Clone)]
pub struct RetryingClient {
    http_client: reqwest::Client,
    timeout: Duration,
    attempts: usize,
}

impl RetryingClient {
    /// Creates a client. `attempts` is clamped to at least one.
    pub fn new(timeout: Duration, attempts: usize) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            timeout,
            attempts: attempts.max(1),
        }
    }

    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        payload: &T,
    ) -> Result<reqwest::Response> {
        let mut delay_ms = INITIAL_BACKOFF_MS;

        for attempt in 0..self.attempts {
            let response = self
                .http_client
                .post(url)
                .json(payload)
                .timeout(self.timeout)
                .send()
                .await;

            match response {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    if attempt + 1 == self.attempts {
                        return Err(anyhow::anyhow!(e));
                    }
                    tracing::debug!("POST {} failed (attempt {}): {}", url, attempt + 1, e);
                    backoff(&mut delay_ms).await;
                }
            }
        }

        Err(anyhow::anyhow!("Retry attempts exhausted"))
    }

    pub async fn get<Q: Serialize + ?Sized>(
        &self,
        url: &str,
        query: &Q,
    ) -> Result<reqwest::Response> {
        let mut delay_ms = INITIAL_BACKOFF_MS;

        for attempt in 0..self.attempts {
            let response = self
                .http_client
                .get(url)
                .query(query)
                .timeout(self.timeout)
                .send()
                .await;

            match response {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    if attempt + 1 == self.attempts {
                        return Err(anyhow::anyhow!(e));
                    }
                    tracing::debug!("GET {} failed (attempt {}): {}", url, attempt + 1, e);
                    backoff(&mut delay_ms).await;
                }
            }
        }

        Err(anyhow::anyhow!("Retry attempts exhausted"))
    }
}

async fn backoff(delay_ms: &mut u64) {
    let jitter = rand::random::<u64>() % 50;
    tokio::time::sleep(Duration::from_millis(*delay_ms + jitter)).await;
    *delay_ms = (*delay_ms * 2).min(MAX_BACKOFF_MS);
}

/// Strips trailing slashes so paths can be appended with `format!`.
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
