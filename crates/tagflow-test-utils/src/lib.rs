// SPDX-FileCopyrightText: 2026 Tagflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Tagflow integration tests.
//!
//! - [`TestHarness`]: the full client stack wired to a wiremock backend
//! - [`fixtures`]: sample tag trees and file listings

pub mod fixtures;
pub mod harness;

pub use harness::{TestHarness, TestHarnessBuilder};
