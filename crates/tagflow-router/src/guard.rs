// SPDX-FileCopyrightText: 2026 Tagflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pre-transition check that keeps protected views behind a session.

use std::sync::Arc;

use tagflow_session::SessionStore;
use tracing::debug;

use crate::route::Route;

/// Which side of the login boundary the client is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Anonymous,
    Authenticated,
}

/// Outcome of evaluating a navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Navigate to the requested route.
    Allow(Route),
    /// Cancel the requested navigation and go here instead.
    Redirect(Route),
}

impl GuardDecision {
    /// The route the client ends up on.
    pub fn destination(self) -> Route {
        match self {
            GuardDecision::Allow(route) | GuardDecision::Redirect(route) => route,
        }
    }
}

/// Decides every navigation from the session state alone.
///
/// Holds no state of its own and does no I/O, so a decision is available
/// before anything of the target view is shown.
#[derive(Debug, Clone)]
pub struct NavigationGuard {
    session: Arc<SessionStore>,
}

impl NavigationGuard {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self { session }
    }

    pub fn state(&self) -> GuardState {
        if self.session.is_logged_in() {
            GuardState::Authenticated
        } else {
            GuardState::Anonymous
        }
    }

    pub fn check(&self, target: Route) -> GuardDecision {
        let decision = decide(self.state(), target);
        debug!(?target, ?decision, "navigation checked");
        decision
    }
}

/// The transition table.
pub fn decide(state: GuardState, target: Route) -> GuardDecision {
    match (state, target) {
        (GuardState::Anonymous, target) if target != Route::LOGIN => {
            GuardDecision::Redirect(Route::LOGIN)
        }
        (GuardState::Authenticated, Route::Login) => GuardDecision::Redirect(Route::HOME),
        (_, target) => GuardDecision::Allow(target),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use strum::IntoEnumIterator;
    use tagflow_session::MemoryStorage;

    use super::*;

    fn guard() -> (NavigationGuard, Arc<SessionStore>) {
        let session = Arc::new(SessionStore::open(Box::new(MemoryStorage::new())));
        (NavigationGuard::new(session.clone()), session)
    }

    #[test]
    fn anonymous_is_sent_to_login() {
        let (guard, _) = guard();
        assert_eq!(guard.check(Route::Home), GuardDecision::Redirect(Route::Login));
        assert_eq!(
            guard.check(Route::SecuritySettings),
            GuardDecision::Redirect(Route::Login)
        );
    }

    #[test]
    fn anonymous_may_open_login() {
        let (guard, _) = guard();
        assert_eq!(guard.check(Route::Login), GuardDecision::Allow(Route::Login));
    }

    #[test]
    fn authenticated_login_visit_goes_home() {
        let (guard, session) = guard();
        session.login("tok", "alice").unwrap();
        assert_eq!(guard.check(Route::Login), GuardDecision::Redirect(Route::Home));
    }

    #[test]
    fn authenticated_may_open_protected_views() {
        let (guard, session) = guard();
        session.login("tok", "alice").unwrap();
        for route in Route::iter().filter(|r| r.is_protected()) {
            assert_eq!(guard.check(route), GuardDecision::Allow(route));
        }
    }

    #[test]
    fn guard_follows_logout() {
        let (guard, session) = guard();
        session.login("tok", "alice").unwrap();
        assert_eq!(guard.state(), GuardState::Authenticated);
        session.logout();
        assert_eq!(guard.state(), GuardState::Anonymous);
        assert_eq!(guard.check(Route::Home), GuardDecision::Redirect(Route::Login));
    }

    fn any_route() -> impl Strategy<Value = Route> {
        prop::sample::select(Route::iter().collect::<Vec<_>>())
    }

    proptest! {
        #[test]
        fn destination_respects_login_boundary(route in any_route(), logged_in in any::<bool>()) {
            let state = if logged_in { GuardState::Authenticated } else { GuardState::Anonymous };
            let dest = decide(state, route).destination();
            if logged_in {
                prop_assert_ne!(dest, Route::Login);
            } else {
                prop_assert!(!dest.is_protected());
            }
        }
    }
}
