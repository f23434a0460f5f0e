// SPDX-FileCopyrightText: 2026 Tagflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canned catalog data.

use tagflow_core::{FileItem, TagNode};

/// Two roots; `Docs` (id 5) sits three levels deep under `Work`.
///
/// ```text
/// Work (1)
/// └── Projects (2)
///     └── Docs (5)
/// Personal (3)
/// └── Photos (4)
/// ```
pub fn sample_tree() -> Vec<TagNode> {
    vec![
        TagNode::leaf(1, "Work", "topic").with_child(
            TagNode::leaf(2, "Projects", "topic").with_child(TagNode::leaf(5, "Docs", "type")),
        ),
        TagNode::leaf(3, "Personal", "topic").with_child(TagNode::leaf(4, "Photos", "type")),
    ]
}

/// `count` files whose ids start at `first_id`.
pub fn sample_files(first_id: i64, count: usize) -> Vec<FileItem> {
    (0..count as i64)
        .map(|offset| {
            let id = first_id + offset;
            FileItem {
                id,
                filename: format!("file-{id}.pdf"),
                extension: Some("pdf".to_string()),
                size: 1024 * (offset as u64 + 1),
                mtime: 1_700_000_000 + offset,
                parent_path: "/library/docs".to_string(),
            }
        })
        .collect()
}
