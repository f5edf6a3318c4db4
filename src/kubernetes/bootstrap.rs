// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! One-time discovery of the Kubernetes endpoint and credentials

use crate::error::{Result, SteadyError};
use kube::{config::KubeConfigOptions, Config as KConfig};
use std::future::Future;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};

/// Source of Kubernetes client configuration.
pub trait ConfigLoader: Send + Sync {
    /// Service-account configuration of the pod we run in.
    /// Returns `InClusterUnavailable` when not running inside a cluster.
    fn in_cluster(&self) -> Result<KConfig>;

    /// Configuration from the local kubeconfig file.
    fn kubeconfig(&self) -> impl Future<Output = Result<KConfig>> + Send;
}

/// Loads configuration the way kube itself does: mounted service account,
/// then `$KUBECONFIG` or `~/.kube/config`.
#[derive(Debug, Clone, Default)]
pub struct KubeConfigLoader;

impl ConfigLoader for KubeConfigLoader {
    fn in_cluster(&self) -> Result<KConfig> {
        KConfig::incluster().map_err(|e| SteadyError::InClusterUnavailable(e.to_string()))
    }

    async fn kubeconfig(&self) -> Result<KConfig> {
        KConfig::from_kubeconfig(&KubeConfigOptions::default())
            .await
            .map_err(|e| SteadyError::KubeconfigError(e.to_string()))
    }
}

/// Establishes the client configuration once and hands it out afterwards.
pub struct Bootstrapper<L = KubeConfigLoader> {
    loader: L,
    configured: OnceCell<KConfig>,
}

impl Default for Bootstrapper {
    fn default() -> Self {
        Self::new(KubeConfigLoader)
    }
}

impl<L: ConfigLoader> Bootstrapper<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            configured: OnceCell::new(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.configured.initialized()
    }

    /// Load the configuration on first use. Later calls return the cached one
    /// without touching the loader. A failed load leaves nothing cached.
    #[instrument(skip(self))]
    pub async fn ensure_configured(&self) -> Result<&KConfig> {
        self.configured.get_or_try_init(|| self.discover()).await
    }

    async fn discover(&self) -> Result<KConfig> {
        match self.loader.in_cluster() {
            Ok(config) => {
                info!("Using in-cluster configuration for {}", config.cluster_url);
                Ok(config)
            }
            Err(SteadyError::InClusterUnavailable(reason)) => {
                debug!("No in-cluster configuration ({}), falling back to kubeconfig", reason);
                let config = self.loader.kubeconfig().await?;
                info!("Using kubeconfig configuration for {}", config.cluster_url);
                Ok(config)
            }
            Err(e) => Err(e),
        }
    }
}
