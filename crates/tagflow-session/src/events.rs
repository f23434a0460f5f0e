// SPDX-FileCopyrightText: 2026 Tagflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session lifecycle events broadcast to the host shell.

/// Capacity of the session event channel.
pub const EVENT_CHANNEL_CAPACITY: usize = 32;

/// A change in authentication state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// `login` stored a new credential.
    LoggedIn { username: String },
    /// `logout` cleared a previously stored credential.
    LoggedOut,
    /// The backend rejected the credential. The host must drop all
    /// in-memory state and perform a full navigation to `redirect_to`.
    Invalidated { redirect_to: String },
}
