// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! RBAC resources: roles and role bindings

use super::post_params;
use crate::error::Result;
use crate::retry::Resilient;
use k8s_openapi::api::rbac::v1::{Role, RoleBinding};
use kube::{
    api::{DeleteParams, ListParams, ObjectList},
    Api, Client,
};
use std::fmt;
use tracing::instrument;

/// Retrying client for `rbac.authorization.k8s.io/v1`
#[derive(Clone)]
pub struct AuthorizationClient {
    proxy: Resilient<Client>,
}

impl fmt::Debug for AuthorizationClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorizationClient")
            .field("default_namespace", &self.proxy.inner().default_namespace())
            .field("policy", self.proxy.policy())
            .finish()
    }
}

impl AuthorizationClient {
    pub fn new(proxy: Resilient<Client>) -> Self {
        Self { proxy }
    }

    pub fn kube_client(&self) -> &Client {
        self.proxy.inner()
    }

    #[instrument(skip(self, lp))]
    pub async fn list_roles(&self, namespace: &str, lp: &ListParams) -> Result<ObjectList<Role>> {
        let roles = self
            .proxy
            .call("list_roles", |c| {
                let api: Api<Role> = Api::namespaced(c.clone(), namespace);
                async move { api.list(lp).await }
            })
            .await?;
        Ok(roles)
    }

    #[instrument(skip(self, role))]
    pub async fn create_role(&self, namespace: &str, role: &Role) -> Result<Role> {
        let pp = &post_params();
        let created = self
            .proxy
            .call("create_role", |c| {
                let api: Api<Role> = Api::namespaced(c.clone(), namespace);
                async move { api.create(pp, role).await }
            })
            .await?;
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn delete_role(&self, namespace: &str, name: &str) -> Result<()> {
        let dp = &DeleteParams::default();
        self.proxy
            .call("delete_role", |c| {
                let api: Api<Role> = Api::namespaced(c.clone(), namespace);
                async move { api.delete(name, dp).await.map(|_| ()) }
            })
            .await?;
        Ok(())
    }

    #[instrument(skip(self, binding))]
    pub async fn create_role_binding(
        &self,
        namespace: &str,
        binding: &RoleBinding,
    ) -> Result<RoleBinding> {
        let pp = &post_params();
        let created = self
            .proxy
            .call("create_role_binding", |c| {
                let api: Api<RoleBinding> = Api::namespaced(c.clone(), namespace);
                async move { api.create(pp, binding).await }
            })
            .await?;
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn delete_role_binding(&self, namespace: &str, name: &str) -> Result<()> {
        let dp = &DeleteParams::default();
        self.proxy
            .call("delete_role_binding", |c| {
                let api: Api<RoleBinding> = Api::namespaced(c.clone(), namespace);
                async move { api.delete(name, dp).await.map(|_| ()) }
            })
            .await?;
        Ok(())
    }
}
