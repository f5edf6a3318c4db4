// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Environment variables read at startup
pub mod env {
    /// Sets both the per-attempt timeout and the retry delay, in seconds
    pub const TIMEOUT: &str = "RAY_K8S_TIMEOUT";
    /// Overrides only the per-attempt timeout
    pub const REQUEST_TIMEOUT: &str = "RAY_K8S_REQUEST_TIMEOUT";
    /// Overrides only the delay between attempts
    pub const RETRY_DELAY: &str = "RAY_K8S_RETRY_DELAY";
}

/// Retry defaults
pub mod retry {
    pub const DEFAULT_TIMEOUT_SECS: f64 = 10.0;
}

/// Field manager used for server-side patches
pub const FIELD_MANAGER: &str = "kube-steady";

/// Status value of a well-formed Kubernetes `Status` rejection
pub const STATUS_FAILURE: &str = "Failure";
