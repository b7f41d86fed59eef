//! Target URL liveness probing.

use async_trait::async_trait;
use std::time::Duration;

/// Probe for whether a target URL answers HTTP at all.
///
/// Any HTTP response counts as reachable, including error statuses; only
/// connection failures and timeouts count against the target. The check is
/// best-effort and bounded, so link creation latency stays predictable.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReachabilityChecker: Send + Sync {
    async fn is_reachable(&self, url: &str) -> bool;
}

/// Production checker issuing a bounded HEAD probe, with a GET fallback for
/// servers that reject HEAD.
pub struct HttpReachabilityChecker {
    client: reqwest::Client,
}

impl HttpReachabilityChecker {
    pub fn new(timeout_secs: u64) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ReachabilityChecker for HttpReachabilityChecker {
    async fn is_reachable(&self, url: &str) -> bool {
        match self.client.head(url).send().await {
            Ok(resp) if resp.status() != reqwest::StatusCode::METHOD_NOT_ALLOWED => true,
            // HEAD rejected outright; some servers only speak GET.
            _ => match self.client.get(url).send().await {
                Ok(_) => true,
                Err(err) => {
                    tracing::debug!(url, error = %err, "reachability probe failed");
                    false
                }
            },
        }
    }
}
