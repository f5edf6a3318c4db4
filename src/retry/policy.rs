// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Retry policy and failure classification

use crate::config::Config;
use crate::constants::STATUS_FAILURE;
use std::time::Duration;

/// What to do with a failed attempt
#[derive(Debug)]
pub enum Classification<E> {
    /// The server answered with a rejection; hand it to the caller as is
    Terminal(E),
    /// The call did not complete; try again after the delay
    Retryable(E),
}

/// Errors that know whether they came from a completed request.
pub trait Classify: Sized {
    /// True when the remote system processed the request and rejected it.
    fn is_application_error(&self) -> bool;
}

impl Classify for kube::Error {
    fn is_application_error(&self) -> bool {
        // kube reconstructs an ErrorResponse from unparseable bodies using the
        // HTTP status line; only a parsed Status object carries "Failure".
        matches!(self, kube::Error::Api(resp) if resp.status == STATUS_FAILURE)
    }
}

/// Fixed-delay, unbounded retry policy
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    retry_delay: Duration,
    request_timeout: Option<Duration>,
}

impl RetryPolicy {
    /// A zero `request_timeout` leaves attempts unbounded.
    pub fn new(retry_delay: Duration, request_timeout: Duration) -> Self {
        Self {
            retry_delay,
            request_timeout: (!request_timeout.is_zero()).then_some(request_timeout),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.retry_delay, config.request_timeout)
    }

    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    pub fn classify<E: Classify>(&self, error: E) -> Classification<E> {
        if error.is_application_error() {
            Classification::Terminal(error)
        } else {
            Classification::Retryable(error)
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
