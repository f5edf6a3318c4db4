// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Lazily constructed, shared API clients, one per client kind

use super::bootstrap::{Bootstrapper, ConfigLoader, KubeConfigLoader};
use crate::api::{AuthorizationClient, CoreClient, ExtensionsClient};
use crate::error::{Result, SteadyError};
use crate::retry::{Resilient, RetryPolicy};
use kube::{Client, Config as KConfig};
use std::fmt;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};

/// Families of cluster operations, each served by its own client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientKind {
    Core,
    Authorization,
    Extensions,
}

impl ClientKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientKind::Core => "core",
            ClientKind::Authorization => "authorization",
            ClientKind::Extensions => "extensions",
        }
    }
}

impl fmt::Display for ClientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turns an established configuration into a live client.
pub trait Connector: Send + Sync {
    fn connect(&self, kind: ClientKind, config: &KConfig) -> Result<Client>;
}

#[derive(Debug, Clone, Default)]
pub struct DefaultConnector;

impl Connector for DefaultConnector {
    fn connect(&self, kind: ClientKind, config: &KConfig) -> Result<Client> {
        Client::try_from(config.clone()).map_err(|e| {
            SteadyError::KubeconfigError(format!("Failed to create {} client: {}", kind, e))
        })
    }
}

/// Owns the configuration and one shared retrying client per [`ClientKind`].
pub struct ClientRegistry<L = KubeConfigLoader, C = DefaultConnector> {
    bootstrapper: Bootstrapper<L>,
    connector: C,
    policy: RetryPolicy,
    core: OnceCell<Arc<CoreClient>>,
    authorization: OnceCell<Arc<AuthorizationClient>>,
    extensions: OnceCell<Arc<ExtensionsClient>>,
}

impl ClientRegistry {
    /// Registry using the standard in-cluster/kubeconfig discovery.
    pub fn with_policy(policy: RetryPolicy) -> Self {
        Self::new(Bootstrapper::default(), DefaultConnector, policy)
    }
}

impl<L: ConfigLoader, C: Connector> ClientRegistry<L, C> {
    pub fn new(bootstrapper: Bootstrapper<L>, connector: C, policy: RetryPolicy) -> Self {
        Self {
            bootstrapper,
            connector,
            policy,
            core: OnceCell::new(),
            authorization: OnceCell::new(),
            extensions: OnceCell::new(),
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Pods, nodes, services and service accounts
    pub async fn core(&self) -> Result<Arc<CoreClient>> {
        self.core
            .get_or_try_init(|| async {
                let proxy = self.build(ClientKind::Core).await?;
                Ok::<_, SteadyError>(Arc::new(CoreClient::new(proxy)))
            })
            .await
            .cloned()
    }

    /// Roles and role bindings
    pub async fn authorization(&self) -> Result<Arc<AuthorizationClient>> {
        self.authorization
            .get_or_try_init(|| async {
                let proxy = self.build(ClientKind::Authorization).await?;
                Ok::<_, SteadyError>(Arc::new(AuthorizationClient::new(proxy)))
            })
            .await
            .cloned()
    }

    /// Ingresses
    pub async fn extensions(&self) -> Result<Arc<ExtensionsClient>> {
        self.extensions
            .get_or_try_init(|| async {
                let proxy = self.build(ClientKind::Extensions).await?;
                Ok::<_, SteadyError>(Arc::new(ExtensionsClient::new(proxy)))
            })
            .await
            .cloned()
    }

    /// Whether the handle for `kind` has been constructed yet
    pub fn is_initialized(&self, kind: ClientKind) -> bool {
        match kind {
            ClientKind::Core => self.core.initialized(),
            ClientKind::Authorization => self.authorization.initialized(),
            ClientKind::Extensions => self.extensions.initialized(),
        }
    }

    #[instrument(skip(self))]
    async fn build(&self, kind: ClientKind) -> Result<Resilient<Client>> {
        let config = self.bootstrapper.ensure_configured().await?;
        debug!("Connecting {} client to {}", kind, config.cluster_url);
        let client = self.connector.connect(kind, config)?;
        info!("Created {} client", kind);
        Ok(Resilient::new(client, self.policy.clone()))
    }
}
