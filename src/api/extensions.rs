// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Ingress resources (`networking.k8s.io/v1`, successor of `extensions/v1beta1`)

use super::post_params;
use crate::error::Result;
use crate::retry::Resilient;
use k8s_openapi::api::networking::v1::Ingress;
use kube::{
    api::{DeleteParams, ListParams, ObjectList},
    Api, Client,
};
use std::fmt;
use tracing::instrument;

/// Retrying client for `networking.k8s.io/v1` ingresses
#[derive(Clone)]
pub struct ExtensionsClient {
    proxy: Resilient<Client>,
}

impl fmt::Debug for ExtensionsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionsClient")
            .field("default_namespace", &self.proxy.inner().default_namespace())
            .field("policy", self.proxy.policy())
            .finish()
    }
}

impl ExtensionsClient {
    pub fn new(proxy: Resilient<Client>) -> Self {
        Self { proxy }
    }

    pub fn kube_client(&self) -> &Client {
        self.proxy.inner()
    }

    #[instrument(skip(self, lp))]
    pub async fn list_ingresses(
        &self,
        namespace: &str,
        lp: &ListParams,
    ) -> Result<ObjectList<Ingress>> {
        let ingresses = self
            .proxy
            .call("list_ingresses", |c| {
                let api: Api<Ingress> = Api::namespaced(c.clone(), namespace);
                async move { api.list(lp).await }
            })
            .await?;
        Ok(ingresses)
    }

    #[instrument(skip(self, ingress))]
    pub async fn create_ingress(&self, namespace: &str, ingress: &Ingress) -> Result<Ingress> {
        let pp = &post_params();
        let created = self
            .proxy
            .call("create_ingress", |c| {
                let api: Api<Ingress> = Api::namespaced(c.clone(), namespace);
                async move { api.create(pp, ingress).await }
            })
            .await?;
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn delete_ingress(&self, namespace: &str, name: &str) -> Result<()> {
        let dp = &DeleteParams::default();
        self.proxy
            .call("delete_ingress", |c| {
                let api: Api<Ingress> = Api::namespaced(c.clone(), namespace);
                async move { api.delete(name, dp).await.map(|_| ()) }
            })
            .await?;
        Ok(())
    }
}
