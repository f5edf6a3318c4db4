// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes configuration discovery and the shared client registry.

pub mod bootstrap;
pub mod registry;

pub use bootstrap::{Bootstrapper, ConfigLoader, KubeConfigLoader};
pub use registry::{ClientKind, ClientRegistry, Connector, DefaultConnector};
