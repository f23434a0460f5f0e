// SPDX-FileCopyrightText: 2026 Tagflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog data source consumed by the resource cache.

use async_trait::async_trait;

use crate::error::TagflowError;
use crate::types::{FileListing, ResourceQuery, TagNode};

/// Read-only access to the tag hierarchy and file listings.
#[async_trait]
pub trait CatalogApi: Send + Sync + 'static {
    /// Fetches the root-level tag nodes with their descendants.
    async fn fetch_tag_tree(&self) -> Result<Vec<TagNode>, TagflowError>;

    /// Fetches one page of files matching `query`.
    async fn list_files(&self, query: &ResourceQuery) -> Result<FileListing, TagflowError>;
}
