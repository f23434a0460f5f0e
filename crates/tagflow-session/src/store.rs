// SPDX-FileCopyrightText: 2026 Tagflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The single source of truth for "is the user authenticated".
//!
//! [`SessionStore`] is the only writer of the session. The gateway and the
//! navigation guard hold an `Arc<SessionStore>` and read through accessors;
//! the gateway's only write is calling [`SessionStore::invalidate`] after a
//! 401.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tagflow_core::{SessionStorage, TagflowError};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::events::{EVENT_CHANNEL_CAPACITY, SessionEvent};
use crate::session::{Session, TOKEN_KEY, USERNAME_KEY};

/// Owns the session and its durable copy.
pub struct SessionStore {
    storage: Box<dyn SessionStorage>,
    state: RwLock<Session>,
    events: broadcast::Sender<SessionEvent>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &*self.read())
            .finish()
    }
}

impl SessionStore {
    /// Creates a store over `storage` and restores any persisted session.
    pub fn open(storage: Box<dyn SessionStorage>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let store = Self {
            storage,
            state: RwLock::new(Session::anonymous()),
            events,
        };
        store.initialize();
        store
    }

    /// Reloads the session from durable storage.
    ///
    /// A half-present pair, or a storage read failure, restores as logged out.
    pub fn initialize(&self) {
        let restored = match (self.storage.get(TOKEN_KEY), self.storage.get(USERNAME_KEY)) {
            (Ok(token), Ok(username)) => Session::from_parts(token, username),
            (Err(e), _) | (_, Err(e)) => {
                warn!(error = %e, "failed to read persisted session, starting logged out");
                Session::anonymous()
            }
        };
        debug!(restored = restored.is_authenticated(), "session initialized");
        *self.write() = restored;
    }

    /// Stores a credential. The token is opaque and never validated locally.
    ///
    /// Both keys are persisted before the in-memory session changes; if
    /// either write fails the store is left logged out and the error is
    /// returned.
    pub fn login(&self, token: &str, username: &str) -> Result<(), TagflowError> {
        let persisted = self
            .storage
            .set(TOKEN_KEY, token)
            .and_then(|()| self.storage.set(USERNAME_KEY, username));

        if let Err(e) = persisted {
            self.clear_storage();
            *self.write() = Session::anonymous();
            return Err(e);
        }

        *self.write() = Session::authenticated(token, username);
        info!(username, "logged in");
        self.publish(SessionEvent::LoggedIn {
            username: username.to_string(),
        });
        Ok(())
    }

    /// Clears the credential from memory and storage.
    ///
    /// Idempotent: a second call changes nothing and publishes nothing.
    pub fn logout(&self) {
        let was_authenticated = {
            let mut state = self.write();
            let was = state.is_authenticated();
            *state = Session::anonymous();
            was
        };
        self.clear_storage();

        if was_authenticated {
            info!("logged out");
            self.publish(SessionEvent::LoggedOut);
        }
    }

    /// Logs out because the backend rejected the credential.
    ///
    /// With `Some(path)` the host is told to drop its in-memory state and
    /// perform a full navigation to `path`; `None` means the client is
    /// already there.
    pub fn invalidate(&self, redirect_to: Option<&str>) {
        self.logout();
        warn!(?redirect_to, "session invalidated by backend");
        if let Some(path) = redirect_to {
            self.publish(SessionEvent::Invalidated {
                redirect_to: path.to_string(),
            });
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.read().is_authenticated()
    }

    pub fn token(&self) -> Option<String> {
        self.read().token().map(String::from)
    }

    pub fn username(&self) -> Option<String> {
        self.read().username().map(String::from)
    }

    /// A copy of the current session.
    pub fn snapshot(&self) -> Session {
        self.read().clone()
    }

    /// Subscribes to session lifecycle events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    fn clear_storage(&self) {
        for key in [TOKEN_KEY, USERNAME_KEY] {
            if let Err(e) = self.storage.remove(key) {
                warn!(key, error = %e, "failed to remove persisted session key");
            }
        }
    }

    fn publish(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Session> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::{FileStorage, MemoryStorage};

    /// Shares one MemoryStorage between a store and the test body.
    struct Shared(Arc<MemoryStorage>);

    impl SessionStorage for Shared {
        fn get(&self, key: &str) -> Result<Option<String>, TagflowError> {
            self.0.get(key)
        }
        fn set(&self, key: &str, value: &str) -> Result<(), TagflowError> {
            self.0.set(key, value)
        }
        fn remove(&self, key: &str) -> Result<(), TagflowError> {
            self.0.remove(key)
        }
    }

    /// Accepts the token but fails on the username.
    struct FailingUsername(MemoryStorage);

    impl SessionStorage for FailingUsername {
        fn get(&self, key: &str) -> Result<Option<String>, TagflowError> {
            self.0.get(key)
        }
        fn set(&self, key: &str, value: &str) -> Result<(), TagflowError> {
            if key == USERNAME_KEY {
                return Err(TagflowError::storage(std::io::Error::other("quota exceeded")));
            }
            self.0.set(key, value)
        }
        fn remove(&self, key: &str) -> Result<(), TagflowError> {
            self.0.remove(key)
        }
    }

    fn shared_store() -> (SessionStore, Arc<MemoryStorage>) {
        let backing = Arc::new(MemoryStorage::new());
        (SessionStore::open(Box::new(Shared(backing.clone()))), backing)
    }

    #[test]
    fn starts_logged_out_on_empty_storage() {
        let (store, _) = shared_store();
        assert!(!store.is_logged_in());
        assert_eq!(store.token(), None);
        assert_eq!(store.username(), None);
    }

    #[test]
    fn login_persists_both_keys() {
        let (store, backing) = shared_store();
        store.login("tok-1", "alice").unwrap();

        assert!(store.is_logged_in());
        assert_eq!(backing.get(TOKEN_KEY).unwrap().as_deref(), Some("tok-1"));
        assert_eq!(backing.get(USERNAME_KEY).unwrap().as_deref(), Some("alice"));
    }

    #[test]
    fn logout_removes_both_keys() {
        let (store, backing) = shared_store();
        store.login("tok-1", "alice").unwrap();
        store.logout();

        assert!(!store.is_logged_in());
        assert_eq!(backing.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(backing.get(USERNAME_KEY).unwrap(), None);
    }

    #[test]
    fn logout_twice_matches_logout_once() {
        let (store, backing) = shared_store();
        store.login("tok-1", "alice").unwrap();
        let mut rx = store.subscribe();

        store.logout();
        let after_once = (store.snapshot(), backing.get(TOKEN_KEY).unwrap());
        store.logout();
        let after_twice = (store.snapshot(), backing.get(TOKEN_KEY).unwrap());

        assert_eq!(after_once, after_twice);
        assert_eq!(rx.try_recv().unwrap(), SessionEvent::LoggedOut);
        assert!(rx.try_recv().is_err(), "second logout must not publish");
    }

    #[test]
    fn restores_complete_session_from_storage() {
        let backing = Arc::new(MemoryStorage::new());
        backing.set(TOKEN_KEY, "persisted").unwrap();
        backing.set(USERNAME_KEY, "bob").unwrap();

        let store = SessionStore::open(Box::new(Shared(backing)));
        assert_eq!(store.token().as_deref(), Some("persisted"));
        assert_eq!(store.username().as_deref(), Some("bob"));
    }

    #[test]
    fn partial_storage_restores_logged_out() {
        let backing = Arc::new(MemoryStorage::new());
        backing.set(TOKEN_KEY, "orphan").unwrap();

        let store = SessionStore::open(Box::new(Shared(backing)));
        assert!(!store.is_logged_in());
        assert_eq!(store.username(), None);
    }

    #[test]
    fn failed_persist_leaves_store_logged_out() {
        let store = SessionStore::open(Box::new(FailingUsername(MemoryStorage::new())));
        let err = store.login("tok", "alice").unwrap_err();

        assert!(matches!(err, TagflowError::Storage { .. }));
        assert!(!store.is_logged_in());
        assert_eq!(store.snapshot(), Session::anonymous());
    }

    #[test]
    fn invalidate_logs_out_and_publishes_redirect() {
        let (store, backing) = shared_store();
        store.login("tok", "alice").unwrap();
        let mut rx = store.subscribe();

        store.invalidate(Some("/login"));

        assert!(!store.is_logged_in());
        assert_eq!(backing.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(rx.try_recv().unwrap(), SessionEvent::LoggedOut);
        assert_eq!(
            rx.try_recv().unwrap(),
            SessionEvent::Invalidated {
                redirect_to: "/login".into()
            }
        );
    }

    #[test]
    fn invalidate_without_redirect_only_logs_out() {
        let (store, _) = shared_store();
        store.login("tok", "alice").unwrap();
        let mut rx = store.subscribe();

        store.invalidate(None);

        assert!(!store.is_logged_in());
        assert_eq!(rx.try_recv().unwrap(), SessionEvent::LoggedOut);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn login_publishes_username() {
        let (store, _) = shared_store();
        let mut rx = store.subscribe();
        store.login("tok", "carol").unwrap();
        assert_eq!(
            rx.try_recv().unwrap(),
            SessionEvent::LoggedIn {
                username: "carol".into()
            }
        );
    }

    #[test]
    fn corrupt_session_file_does_not_block_login() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{truncated").unwrap();

        let store = SessionStore::open(Box::new(FileStorage::new(&path)));
        assert!(!store.is_logged_in());

        store.logout();
        let reread = FileStorage::new(&path);
        assert_eq!(reread.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(reread.get(USERNAME_KEY).unwrap(), None);

        store.login("tok-2", "alice").unwrap();
        assert!(store.is_logged_in());

        let reopened = SessionStore::open(Box::new(FileStorage::new(&path)));
        assert_eq!(reopened.username().as_deref(), Some("alice"));
    }

    #[tracing_test::traced_test]
    #[test]
    fn token_never_reaches_logs() {
        let (store, _) = shared_store();
        store.login("super-secret-token", "alice").unwrap();
        store.logout();
        assert!(logs_contain("logged in"));
        assert!(!logs_contain("super-secret-token"));
    }

    mod invariants {
        use proptest::prelude::*;

        use super::*;

        #[derive(Debug, Clone)]
        enum Op {
            Login(String, String),
            Logout,
            Invalidate,
            Reload,
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                ("[a-z0-9]{1,12}", "[a-z]{1,8}").prop_map(|(t, u)| Op::Login(t, u)),
                Just(Op::Logout),
                Just(Op::Invalidate),
                Just(Op::Reload),
            ]
        }

        proptest! {
            #[test]
            fn token_and_username_are_set_together(ops in proptest::collection::vec(op(), 0..24)) {
                let (store, backing) = shared_store();
                for op in ops {
                    match op {
                        Op::Login(t, u) => store.login(&t, &u).unwrap(),
                        Op::Logout => store.logout(),
                        Op::Invalidate => store.invalidate(Some("/login")),
                        Op::Reload => store.initialize(),
                    }
                    let session = store.snapshot();
                    prop_assert_eq!(session.token().is_none(), session.username().is_none());
                    prop_assert_eq!(
                        backing.get(TOKEN_KEY).unwrap().is_none(),
                        backing.get(USERNAME_KEY).unwrap().is_none()
                    );
                    prop_assert_eq!(store.is_logged_in(), session.token().is_some());
                }
            }
        }
    }
}
