// SPDX-FileCopyrightText: 2026 Tagflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read access to the client's current location.

/// Reports the path the client is currently showing.
pub trait Location: Send + Sync + 'static {
    /// Current location path, e.g. `/login` or `/settings/security`.
    fn current_path(&self) -> String;
}
