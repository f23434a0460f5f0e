// SPDX-FileCopyrightText: 2026 Tagflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable key-value storage backing the session.

use crate::error::TagflowError;

/// String key-value store that survives process restarts.
///
/// Operations are synchronous: the session is mutated between suspension
/// points and never across an `.await`.
pub trait SessionStorage: Send + Sync + 'static {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, TagflowError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), TagflowError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), TagflowError>;
}
