// SPDX-FileCopyrightText: 2026 Tagflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the Tagflow client components.

pub mod catalog;
pub mod location;
pub mod storage;

pub use catalog::CatalogApi;
pub use location::Location;
pub use storage::SessionStorage;
