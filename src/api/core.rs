// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Core resources: nodes, pods, services and service accounts

use super::{patch_params, post_params};
use crate::error::Result;
use crate::retry::Resilient;
use k8s_openapi::api::core::v1::{Node, Pod, Service, ServiceAccount};
use kube::{
    api::{DeleteParams, ListParams, ObjectList, Patch},
    Api, Client,
};
use std::collections::BTreeMap;
use std::fmt;
use tracing::instrument;

/// Retrying client for the core (v1) API group
#[derive(Clone)]
pub struct CoreClient {
    proxy: Resilient<Client>,
}

impl fmt::Debug for CoreClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoreClient")
            .field("default_namespace", &self.proxy.inner().default_namespace())
            .field("policy", self.proxy.policy())
            .finish()
    }
}

impl CoreClient {
    pub fn new(proxy: Resilient<Client>) -> Self {
        Self { proxy }
    }

    pub fn default_namespace(&self) -> &str {
        self.proxy.inner().default_namespace()
    }

    /// The underlying client, without retries
    pub fn kube_client(&self) -> &Client {
        self.proxy.inner()
    }

    #[instrument(skip(self, lp))]
    pub async fn list_nodes(&self, lp: &ListParams) -> Result<ObjectList<Node>> {
        let nodes = self
            .proxy
            .call("list_nodes", |c| {
                let api: Api<Node> = Api::all(c.clone());
                async move { api.list(lp).await }
            })
            .await?;
        Ok(nodes)
    }

    #[instrument(skip(self))]
    pub async fn get_node(&self, name: &str) -> Result<Node> {
        let node = self
            .proxy
            .call("get_node", |c| {
                let api: Api<Node> = Api::all(c.clone());
                async move { api.get(name).await }
            })
            .await?;
        Ok(node)
    }

    /// Merge `labels` into the node's labels
    #[instrument(skip(self, labels))]
    pub async fn patch_node_labels(
        &self,
        name: &str,
        labels: &BTreeMap<String, String>,
    ) -> Result<Node> {
        let patch = &labels_patch(labels);
        let pp = &patch_params();
        let node = self
            .proxy
            .call("patch_node_labels", |c| {
                let api: Api<Node> = Api::all(c.clone());
                async move { api.patch(name, pp, patch).await }
            })
            .await?;
        Ok(node)
    }

    #[instrument(skip(self, lp))]
    pub async fn list_pods(&self, namespace: &str, lp: &ListParams) -> Result<ObjectList<Pod>> {
        let pods = self
            .proxy
            .call("list_pods", |c| {
                let api: Api<Pod> = Api::namespaced(c.clone(), namespace);
                async move { api.list(lp).await }
            })
            .await?;
        Ok(pods)
    }

    #[instrument(skip(self))]
    pub async fn get_pod(&self, namespace: &str, name: &str) -> Result<Pod> {
        let pod = self
            .proxy
            .call("get_pod", |c| {
                let api: Api<Pod> = Api::namespaced(c.clone(), namespace);
                async move { api.get(name).await }
            })
            .await?;
        Ok(pod)
    }

    #[instrument(skip(self, pod))]
    pub async fn create_pod(&self, namespace: &str, pod: &Pod) -> Result<Pod> {
        let pp = &post_params();
        let created = self
            .proxy
            .call("create_pod", |c| {
                let api: Api<Pod> = Api::namespaced(c.clone(), namespace);
                async move { api.create(pp, pod).await }
            })
            .await?;
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn delete_pod(&self, namespace: &str, name: &str) -> Result<()> {
        let dp = &DeleteParams::default();
        self.proxy
            .call("delete_pod", |c| {
                let api: Api<Pod> = Api::namespaced(c.clone(), namespace);
                async move { api.delete(name, dp).await.map(|_| ()) }
            })
            .await?;
        Ok(())
    }

    /// Merge `labels` into the pod's labels
    #[instrument(skip(self, labels))]
    pub async fn patch_pod_labels(
        &self,
        namespace: &str,
        name: &str,
        labels: &BTreeMap<String, String>,
    ) -> Result<Pod> {
        let patch = &labels_patch(labels);
        let pp = &patch_params();
        let pod = self
            .proxy
            .call("patch_pod_labels", |c| {
                let api: Api<Pod> = Api::namespaced(c.clone(), namespace);
                async move { api.patch(name, pp, patch).await }
            })
            .await?;
        Ok(pod)
    }

    #[instrument(skip(self, service))]
    pub async fn create_service(&self, namespace: &str, service: &Service) -> Result<Service> {
        let pp = &post_params();
        let created = self
            .proxy
            .call("create_service", |c| {
                let api: Api<Service> = Api::namespaced(c.clone(), namespace);
                async move { api.create(pp, service).await }
            })
            .await?;
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn delete_service(&self, namespace: &str, name: &str) -> Result<()> {
        let dp = &DeleteParams::default();
        self.proxy
            .call("delete_service", |c| {
                let api: Api<Service> = Api::namespaced(c.clone(), namespace);
                async move { api.delete(name, dp).await.map(|_| ()) }
            })
            .await?;
        Ok(())
    }

    #[instrument(skip(self, account))]
    pub async fn create_service_account(
        &self,
        namespace: &str,
        account: &ServiceAccount,
    ) -> Result<ServiceAccount> {
        let pp = &post_params();
        let created = self
            .proxy
            .call("create_service_account", |c| {
                let api: Api<ServiceAccount> = Api::namespaced(c.clone(), namespace);
                async move { api.create(pp, account).await }
            })
            .await?;
        Ok(created)
    }
}

fn labels_patch(labels: &BTreeMap<String, String>) -> Patch<serde_json::Value> {
    Patch::Merge(serde_json::json!({ "metadata": { "labels": labels } }))
}
