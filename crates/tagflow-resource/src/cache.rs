// SPDX-FileCopyrightText: 2026 Tagflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cached tag hierarchy and current file listing.
//!
//! Fetches do not cancel each other. When two listings overlap, the one
//! whose response arrives last is what the cache shows, selection included.
//! Each call gets a [`FetchTicket`] so a caller can tell whether a newer
//! request has been issued since.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tagflow_core::{CatalogApi, FileItem, ResourceQuery, TagNode, TagflowError};
use tracing::{debug, error};

use crate::tree::find_tag_name;

/// Everything the cache currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceState {
    pub tags: Vec<TagNode>,
    pub files: Vec<FileItem>,
    /// Total matching files reported with the last successful listing.
    pub total: i64,
    pub selected_tag_id: Option<i64>,
    /// Empty when no tag is selected or the tag is not in the cached tree.
    pub selected_tag_name: String,
    pub loading: bool,
}

/// Identifies one `fetch_files` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket {
    generation: u64,
}

impl FetchTicket {
    pub fn generation(self) -> u64 {
        self.generation
    }
}

pub struct ResourceCache {
    api: Arc<dyn CatalogApi>,
    state: RwLock<ResourceState>,
    generation: AtomicU64,
}

impl std::fmt::Debug for ResourceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.read();
        f.debug_struct("ResourceCache")
            .field("tags", &state.tags.len())
            .field("files", &state.files.len())
            .field("selected_tag_id", &state.selected_tag_id)
            .field("loading", &state.loading)
            .finish()
    }
}

impl ResourceCache {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self {
            api,
            state: RwLock::new(ResourceState::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Replaces the cached tree. On failure the previous tree is kept.
    pub async fn fetch_tag_tree(&self) -> Result<(), TagflowError> {
        match self.api.fetch_tag_tree().await {
            Ok(tags) => {
                debug!(roots = tags.len(), "tag tree refreshed");
                self.write().tags = tags;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "failed to fetch tag tree");
                Err(e)
            }
        }
    }

    /// Lists every file under `tag_id` (recursively), or all files for `None`.
    pub async fn fetch_files(&self, tag_id: Option<i64>) -> Result<FetchTicket, TagflowError> {
        self.fetch_page(ResourceQuery::for_tag(tag_id)).await
    }

    /// Like [`fetch_files`](Self::fetch_files) with explicit pagination.
    pub async fn fetch_page(&self, query: ResourceQuery) -> Result<FetchTicket, TagflowError> {
        let ticket = FetchTicket {
            generation: self.generation.fetch_add(1, Ordering::SeqCst) + 1,
        };
        let tag_id = query.tag_id;

        let selected_tag_name = {
            let mut state = self.write();
            let name = tag_id
                .and_then(|id| find_tag_name(&state.tags, id))
                .unwrap_or_default()
                .to_string();
            state.loading = true;
            state.selected_tag_id = tag_id;
            state.selected_tag_name = name.clone();
            name
        };

        let result = self.api.list_files(&query).await;

        let mut state = self.write();
        state.loading = false;
        match result {
            Ok(listing) => {
                debug!(
                    ?tag_id,
                    generation = ticket.generation,
                    items = listing.items.len(),
                    total = listing.total,
                    "file listing applied"
                );
                state.files = listing.items;
                state.total = listing.total;
                state.selected_tag_id = tag_id;
                state.selected_tag_name = selected_tag_name;
                Ok(ticket)
            }
            Err(e) => {
                error!(?tag_id, error = %e, "failed to fetch files");
                Err(e)
            }
        }
    }

    /// Ticket of the most recently issued request, if any.
    pub fn latest_ticket(&self) -> Option<FetchTicket> {
        match self.generation.load(Ordering::SeqCst) {
            0 => None,
            generation => Some(FetchTicket { generation }),
        }
    }

    /// Whether no request has been issued after `ticket`.
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.latest_ticket() == Some(ticket)
    }

    pub fn tags(&self) -> Vec<TagNode> {
        self.read().tags.clone()
    }

    pub fn files(&self) -> Vec<FileItem> {
        self.read().files.clone()
    }

    pub fn total(&self) -> i64 {
        self.read().total
    }

    pub fn selected_tag_id(&self) -> Option<i64> {
        self.read().selected_tag_id
    }

    pub fn selected_tag_name(&self) -> String {
        self.read().selected_tag_name.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.read().loading
    }

    pub fn snapshot(&self) -> ResourceState {
        self.read().clone()
    }

    /// Drops everything cached, e.g. after the session was invalidated.
    pub fn clear(&self) {
        *self.write() = ResourceState::default();
        debug!("resource cache cleared");
    }

    fn read(&self) -> RwLockReadGuard<'_, ResourceState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, ResourceState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}
