// SPDX-FileCopyrightText: 2026 Tagflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Tagflow client.

use thiserror::Error;

/// The primary error type used across all Tagflow client components.
#[derive(Debug, Error)]
pub enum TagflowError {
    /// Configuration errors (invalid values, unusable base URL).
    #[error("configuration error: {0}")]
    Config(String),

    /// Durable session storage errors (I/O, serialization, quota).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The backend rejected the session credential (HTTP 401).
    #[error("unauthorized request to {path}")]
    Unauthorized { path: String },

    /// A protected view was requested without a session; the navigation
    /// guard redirected before any request was sent.
    #[error("login required for {path}")]
    LoginRequired { path: String },

    /// Invalid interactive input (password prompt, confirmation mismatch).
    #[error("invalid input: {0}")]
    Input(String),

    /// The request never produced an HTTP response (DNS, connect, reset).
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The request exceeded the fixed per-request timeout.
    #[error("request timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// The backend answered with a non-success status other than 401.
    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// A success response body could not be decoded.
    #[error("decode error: {message}")]
    Decode {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TagflowError {
    /// Returns true when the backend rejected the credential.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, TagflowError::Unauthorized { .. })
    }

    /// Returns true when the command needs a session first, either because
    /// the guard refused or because the backend rejected the credential.
    pub fn needs_login(&self) -> bool {
        matches!(
            self,
            TagflowError::Unauthorized { .. } | TagflowError::LoginRequired { .. }
        )
    }

    /// Returns the HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            TagflowError::Unauthorized { .. } => Some(401),
            TagflowError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Wraps any error as a storage failure.
    pub fn storage(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        TagflowError::Storage {
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_refusal_is_not_a_backend_rejection() {
        let err = TagflowError::LoginRequired {
            path: "/settings/security".into(),
        };
        assert!(!err.is_unauthorized());
        assert!(err.needs_login());
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "login required for /settings/security");
    }

    #[test]
    fn backend_401_needs_login() {
        let err = TagflowError::Unauthorized { path: "/v1/files".into() };
        assert!(err.is_unauthorized());
        assert!(err.needs_login());
        assert_eq!(err.status(), Some(401));
    }
}
