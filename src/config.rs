// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{env as vars, retry::DEFAULT_TIMEOUT_SECS};
use anyhow::{bail, Context, Result};
use std::env;
use std::time::Duration;

/// Retry configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Upper bound for a single attempt; zero disables the bound
    pub request_timeout: Duration,
    /// Fixed wait between a transient failure and the next attempt
    pub retry_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        let secs = Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS);
        Config {
            request_timeout: secs,
            retry_delay: secs,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    /// `RAY_K8S_TIMEOUT` sets both durations; the specific variables win over it.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let shared = parse_secs(vars::TIMEOUT, lookup(vars::TIMEOUT))?;
        let defaults = Config::default();

        let request_timeout = parse_secs(vars::REQUEST_TIMEOUT, lookup(vars::REQUEST_TIMEOUT))?
            .or(shared)
            .unwrap_or(defaults.request_timeout);
        let retry_delay = parse_secs(vars::RETRY_DELAY, lookup(vars::RETRY_DELAY))?
            .or(shared)
            .unwrap_or(defaults.retry_delay);

        Ok(Config {
            request_timeout,
            retry_delay,
        })
    }
}

fn parse_secs(name: &str, value: Option<String>) -> Result<Option<Duration>> {
    let Some(raw) = value else {
        return Ok(None);
    };

    let secs: f64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{} must be a number of seconds, got {:?}", name, raw))?;
    if !secs.is_finite() || secs < 0.0 {
        bail!("{} must be a non-negative number of seconds, got {:?}", name, raw);
    }

    let duration = Duration::try_from_secs_f64(secs)
        .with_context(|| format!("{} is out of range, got {:?}", name, raw))?;
    Ok(Some(duration))
}
