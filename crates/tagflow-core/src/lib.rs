// SPDX-FileCopyrightText: 2026 Tagflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Tagflow client.
//!
//! This crate provides the error type, the wire types shared with the
//! catalog backend, and the trait seams (durable storage, catalog access,
//! current location) that the session, gateway, router and resource crates
//! are built on.

pub mod error;
pub mod traits;
pub mod types;

pub use error::TagflowError;
pub use traits::{CatalogApi, Location, SessionStorage};
pub use types::{
    FileItem, FileListing, LoginRequest, LoginResponse, ResourceQuery, TagNode,
    UpdatePasswordRequest,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_reported_for_http_errors() {
        let unauthorized = TagflowError::Unauthorized {
            path: "/v1/files".into(),
        };
        assert!(unauthorized.is_unauthorized());
        assert_eq!(unauthorized.status(), Some(401));

        let api = TagflowError::Api {
            status: 422,
            body: "bad".into(),
        };
        assert!(!api.is_unauthorized());
        assert_eq!(api.status(), Some(422));

        let timeout = TagflowError::Timeout {
            duration: std::time::Duration::from_secs(10),
        };
        assert_eq!(timeout.status(), None);
    }

    #[test]
    fn storage_helper_wraps_io_errors() {
        let err = TagflowError::storage(std::io::Error::other("disk full"));
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn all_traits_are_object_safe() {
        fn _storage(_: &dyn SessionStorage) {}
        fn _catalog(_: &dyn CatalogApi) {}
        fn _location(_: &dyn Location) {}
    }
}
