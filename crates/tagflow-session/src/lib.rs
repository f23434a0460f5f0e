// SPDX-FileCopyrightText: 2026 Tagflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session management for the Tagflow client.
//!
//! - [`SessionStore`]: owns the bearer token and username, persists them,
//!   and broadcasts [`SessionEvent`]s.
//! - [`MemoryStorage`] and [`FileStorage`]: durable backends.

pub mod events;
pub mod session;
pub mod storage;
pub mod store;

pub use events::SessionEvent;
pub use session::{Session, TOKEN_KEY, USERNAME_KEY};
pub use storage::{open_storage, FileStorage, MemoryStorage};
pub use store::SessionStore;
