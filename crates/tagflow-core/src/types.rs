// SPDX-FileCopyrightText: 2026 Tagflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types exchanged with the catalog backend.

use serde::{Deserialize, Serialize};

/// A node of the tag hierarchy as returned by `GET /v1/tags/tree`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagNode {
    pub id: i64,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub children: Vec<TagNode>,
}

impl TagNode {
    /// Creates a leaf node.
    pub fn leaf(id: i64, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            children: Vec::new(),
        }
    }

    /// Appends a child and returns the node, for building trees inline.
    pub fn with_child(mut self, child: TagNode) -> Self {
        self.children.push(child);
        self
    }
}

/// A file entry in a listing snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileItem {
    pub id: i64,
    pub filename: String,
    pub extension: Option<String>,
    /// Size in bytes.
    pub size: u64,
    /// Modification time, epoch seconds.
    pub mtime: i64,
    pub parent_path: String,
}

/// Response body of `GET /v1/files`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileListing {
    pub items: Vec<FileItem>,
    pub total: i64,
}

/// Parameters of a file listing request.
///
/// `None` fields are left out of the query string so the backend applies
/// its own defaults (page 1, limit 50).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceQuery {
    pub tag_id: Option<i64>,
    pub recursive: bool,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ResourceQuery {
    /// Recursive listing for a tag (or every file when `tag_id` is `None`).
    pub fn for_tag(tag_id: Option<i64>) -> Self {
        Self {
            tag_id,
            recursive: true,
            page: None,
            limit: None,
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query-string pairs in a stable order.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(4);
        if let Some(tag_id) = self.tag_id {
            pairs.push(("tag_id", tag_id.to_string()));
        }
        pairs.push(("recursive", self.recursive.to_string()));
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Success body of `POST /auth/login`.
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("token", &"[redacted]")
            .finish()
    }
}

/// Body of `POST /auth/update-password`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}
