// SPDX-FileCopyrightText: 2026 Tagflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Named client-side routes.

use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// A view the client can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum Route {
    Login,
    Home,
    SecuritySettings,
    LibrariesSettings,
}

impl Route {
    /// The view unauthenticated navigation is redirected to.
    pub const LOGIN: Route = Route::Login;

    /// The view an authenticated visit to the login view lands on.
    pub const HOME: Route = Route::Home;

    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Home => "/",
            Route::SecuritySettings => "/settings/security",
            Route::LibrariesSettings => "/settings/libraries",
        }
    }

    /// Resolves a location path, ignoring a trailing slash and any query
    /// string or fragment.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Route::iter().find(|route| route.path() == normalized)
    }

    /// Every route except the login view requires a session.
    pub fn is_protected(self) -> bool {
        self != Route::LOGIN
    }
}
