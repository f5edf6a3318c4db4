// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Retry policy, failure classification and the resilient call proxy.

pub mod policy;
pub mod proxy;

pub use policy::{Classification, Classify, RetryPolicy};
pub use proxy::Resilient;
