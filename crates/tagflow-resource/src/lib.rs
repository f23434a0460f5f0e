// SPDX-FileCopyrightText: 2026 Tagflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tag tree and file listing cache backed by a [`CatalogApi`](tagflow_core::CatalogApi).

pub mod cache;
pub mod tree;

pub use cache::{FetchTicket, ResourceCache, ResourceState};
pub use tree::{find_tag, find_tag_name};
