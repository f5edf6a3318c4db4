// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use kube::api::ListParams;
use tracing::info;
use tracing_subscriber::EnvFilter;

use kube_steady::config::Config;
use kube_steady::kubernetes::ClientRegistry;
use kube_steady::retry::RetryPolicy;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: request_timeout={:?}, retry_delay={:?}",
        config.request_timeout, config.retry_delay
    );

    let registry = ClientRegistry::with_policy(RetryPolicy::from_config(&config));

    // Connects on first use; retries below only cover transient failures
    let core = registry.core().await?;
    let namespace = core.default_namespace().to_string();

    let nodes = core.list_nodes(&ListParams::default()).await?;
    info!("Cluster has {} nodes", nodes.items.len());

    let pods = core.list_pods(&namespace, &ListParams::default()).await?;
    info!("Namespace {} has {} pods", namespace, pods.items.len());

    let auth = registry.authorization().await?;
    let roles = auth.list_roles(&namespace, &ListParams::default()).await?;
    info!("Namespace {} has {} roles", namespace, roles.items.len());

    let extensions = registry.extensions().await?;
    let ingresses = extensions
        .list_ingresses(&namespace, &ListParams::default())
        .await?;
    info!("Namespace {} has {} ingresses", namespace, ingresses.items.len());

    Ok(())
}
