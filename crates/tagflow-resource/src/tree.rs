// SPDX-FileCopyrightText: 2026 Tagflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lookups over the cached tag hierarchy.

use tagflow_core::TagNode;

/// Depth-first pre-order search for the first node with `id`.
///
/// Uses an explicit stack, so arbitrarily deep trees cannot overflow the
/// call stack.
pub fn find_tag(tree: &[TagNode], id: i64) -> Option<&TagNode> {
    let mut stack: Vec<&TagNode> = tree.iter().rev().collect();
    while let Some(node) = stack.pop() {
        if node.id == id {
            return Some(node);
        }
        // Reversed so the leftmost child is popped first.
        stack.extend(node.children.iter().rev());
    }
    None
}

/// Name of the first node with `id`, or `None` when the tree has no such tag.
pub fn find_tag_name(tree: &[TagNode], id: i64) -> Option<&str> {
    find_tag(tree, id).map(|node| node.name.as_str())
}
