// SPDX-FileCopyrightText: 2026 Tagflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client-side routing for the Tagflow client.
//!
//! - [`Route`]: the named views and their paths
//! - [`NavigationGuard`]: Anonymous/Authenticated transition rules
//! - [`Navigator`]: current location, updated only through the guard

pub mod guard;
pub mod navigator;
pub mod route;

pub use guard::{decide, GuardDecision, GuardState, NavigationGuard};
pub use navigator::Navigator;
pub use route::Route;
