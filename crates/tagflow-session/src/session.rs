// SPDX-FileCopyrightText: 2026 Tagflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The session value: a bearer token and the identity it belongs to.

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "auth_token";

/// Storage key holding the username.
pub const USERNAME_KEY: &str = "username";

/// Authentication state of the client.
///
/// Either both fields are set or neither is; the constructors are the only
/// way to build one.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    username: Option<String>,
}

impl Session {
    /// The logged-out session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A logged-in session.
    pub fn authenticated(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            username: Some(username.into()),
        }
    }

    /// Builds a session from persisted values; a partial pair is anonymous.
    pub fn from_parts(token: Option<String>, username: Option<String>) -> Self {
        match (token, username) {
            (Some(token), Some(username)) => Self::authenticated(token, username),
            _ => Self::anonymous(),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "[redacted]"))
            .field("username", &self.username)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_parts_restore_as_anonymous() {
        assert_eq!(
            Session::from_parts(Some("t".into()), None),
            Session::anonymous()
        );
        assert_eq!(
            Session::from_parts(None, Some("alice".into())),
            Session::anonymous()
        );
    }

    #[test]
    fn complete_parts_restore_as_authenticated() {
        let session = Session::from_parts(Some("t".into()), Some("alice".into()));
        assert!(session.is_authenticated());
        assert_eq!(session.username(), Some("alice"));
    }

    #[test]
    fn debug_redacts_token() {
        let debug = format!("{:?}", Session::authenticated("secret-token", "alice"));
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("alice"));
    }
}
