// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resilient call proxy: unbounded fixed-delay retries around a client.

use super::policy::{Classification, Classify, RetryPolicy};
use std::fmt::Display;
use std::future::Future;
use tokio::time::{sleep, timeout};
use tracing::{debug, error};

/// Wraps a client so every operation routed through [`Resilient::call`]
/// retries transient failures until it succeeds or is rejected.
#[derive(Debug, Clone)]
pub struct Resilient<T> {
    inner: T,
    policy: RetryPolicy,
}

impl<T> Resilient<T> {
    pub fn new(inner: T, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    /// The wrapped client, untouched
    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Invoke `f` against the wrapped client until it succeeds or fails with
    /// an application error. `f` is re-run with the same captured arguments
    /// on every attempt.
    pub async fn call<'a, R, E, F, Fut>(&'a self, operation: &str, f: F) -> Result<R, E>
    where
        F: Fn(&'a T) -> Fut,
        Fut: Future<Output = Result<R, E>>,
        E: Classify + Display,
    {
        let delay = self.policy.retry_delay();
        let mut attempt: u64 = 1;

        loop {
            let outcome = match self.policy.request_timeout() {
                Some(limit) => match timeout(limit, f(&self.inner)).await {
                    Ok(result) => result,
                    Err(_) => {
                        error!(
                            "K8s API call {} timed out after {:?}! Retrying in {:?}...",
                            operation, limit, delay
                        );
                        self.wait(delay).await;
                        attempt += 1;
                        continue;
                    }
                },
                None => f(&self.inner).await,
            };

            match outcome {
                Ok(value) => {
                    if attempt > 1 {
                        debug!("K8s API call {} succeeded after {} attempts", operation, attempt);
                    }
                    return Ok(value);
                }
                Err(e) => match self.policy.classify(e) {
                    Classification::Terminal(e) => {
                        error!("K8s API call {} failed: {}", operation, e);
                        return Err(e);
                    }
                    Classification::Retryable(e) => {
                        error!(
                            "K8s API call {} failed: {}! Retrying in {:?}...",
                            operation, e, delay
                        );
                    }
                },
            }

            self.wait(delay).await;
            attempt += 1;
        }
    }

    async fn wait(&self, delay: std::time::Duration) {
        if !delay.is_zero() {
            sleep(delay).await;
        }
    }
}
