// SPDX-FileCopyrightText: 2026 Tagflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Current-location tracking with every transition passed through the guard.

use std::sync::RwLock;

use tagflow_core::Location;
use tracing::info;

use crate::guard::{GuardDecision, NavigationGuard};
use crate::route::Route;

/// Holds the route the client is showing.
#[derive(Debug)]
pub struct Navigator {
    guard: NavigationGuard,
    current: RwLock<Route>,
}

impl Navigator {
    /// Starts on `initial` after running it through the guard.
    pub fn new(guard: NavigationGuard, initial: Route) -> Self {
        let start = guard.check(initial).destination();
        Self {
            guard,
            current: RwLock::new(start),
        }
    }

    pub fn current(&self) -> Route {
        *self.current.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Attempts a client-side transition and returns the guard's decision.
    pub fn navigate(&self, target: Route) -> GuardDecision {
        let decision = self.guard.check(target);
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = decision.destination();
        decision
    }

    /// Full navigation after the session was invalidated. Bypasses nothing:
    /// the target is still checked, so it lands on login when logged out.
    pub fn hard_navigate(&self, path: &str) -> Route {
        let target = Route::from_path(path).unwrap_or(Route::LOGIN);
        let landed = self.navigate(target).destination();
        info!(path, ?landed, "hard navigation");
        landed
    }

    pub fn guard(&self) -> &NavigationGuard {
        &self.guard
    }
}

impl Location for Navigator {
    fn current_path(&self) -> String {
        self.current().path().to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tagflow_session::{MemoryStorage, SessionStore};

    use super::*;

    fn navigator(initial: Route) -> (Navigator, Arc<SessionStore>) {
        let session = Arc::new(SessionStore::open(Box::new(MemoryStorage::new())));
        (Navigator::new(NavigationGuard::new(session.clone()), initial), session)
    }

    #[test]
    fn anonymous_start_lands_on_login() {
        let (nav, _) = navigator(Route::Home);
        assert_eq!(nav.current(), Route::Login);
        assert_eq!(nav.current_path(), "/login");
    }

    #[test]
    fn navigate_records_redirect_destination() {
        let (nav, session) = navigator(Route::Login);
        session.login("tok", "alice").unwrap();

        assert_eq!(nav.navigate(Route::Login), GuardDecision::Redirect(Route::Home));
        assert_eq!(nav.current(), Route::Home);

        assert_eq!(
            nav.navigate(Route::LibrariesSettings),
            GuardDecision::Allow(Route::LibrariesSettings)
        );
        assert_eq!(nav.current_path(), "/settings/libraries");
    }

    #[test]
    fn hard_navigate_after_logout_shows_login() {
        let (nav, session) = navigator(Route::Login);
        session.login("tok", "alice").unwrap();
        nav.navigate(Route::SecuritySettings);

        session.logout();
        assert_eq!(nav.hard_navigate("/login"), Route::Login);
        assert_eq!(nav.current(), Route::Login);
    }

    #[test]
    fn unknown_hard_navigation_path_falls_back_to_login() {
        let (nav, _) = navigator(Route::Login);
        assert_eq!(nav.hard_navigate("/does/not/exist"), Route::Login);
    }
}
