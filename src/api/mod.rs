// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed operation surfaces for each client kind.
//! Every operation goes through the resilient proxy.

pub mod authorization;
pub mod core;
pub mod extensions;

pub use authorization::AuthorizationClient;
pub use self::core::CoreClient;
pub use extensions::ExtensionsClient;

use crate::constants::FIELD_MANAGER;
use kube::api::{PatchParams, PostParams};

pub(crate) fn post_params() -> PostParams {
    PostParams {
        field_manager: Some(FIELD_MANAGER.to_string()),
        ..Default::default()
    }
}

pub(crate) fn patch_params() -> PatchParams {
    PatchParams {
        field_manager: Some(FIELD_MANAGER.to_string()),
        ..Default::default()
    }
}
