// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SteadyError {
    /// The API server answered and rejected the request.
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("In-cluster configuration unavailable: {0}")]
    InClusterUnavailable(String),

    #[error("Failed to load kubeconfig: {0}")]
    KubeconfigError(String),
}

impl SteadyError {
    /// HTTP status code of an API rejection, if this is one
    pub fn api_code(&self) -> Option<u16> {
        match self {
            SteadyError::KubeError(kube::Error::Api(resp)) => Some(resp.code),
            _ => None,
        }
    }

    /// The API server answered 404 Not Found
    pub fn is_not_found(&self) -> bool {
        self.api_code() == Some(404)
    }
}

pub type Result<T> = std::result::Result<T, SteadyError>;
