// SPDX-FileCopyrightText: 2026 Tagflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway to the Tagflow catalog backend.
//!
//! [`HttpGateway`] attaches the session's bearer token to every request,
//! applies the fixed timeout, and invalidates the session on `401`. The
//! typed endpoint wrappers live in [`api`]; the gateway also implements
//! [`tagflow_core::CatalogApi`] for the resource cache.

pub mod api;
pub mod client;

pub use api::{FILES_ENDPOINT, LOGIN_ENDPOINT, TAG_TREE_ENDPOINT, UPDATE_PASSWORD_ENDPOINT};
pub use client::{HttpGateway, LOGIN_PATH};
