// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tracing::info;

use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Upload,
    Transactions,
    Chat,
    Export,
}

impl Route {
    /// Resolves a route path; empty and unknown paths land on the dashboard.
    pub fn resolve(path: &str) -> Route {
        match path.trim().trim_matches('/') {
            "auth/login" => Route::Login,
            "auth/register" => Route::Register,
            "upload" => Route::Upload,
            "transactions" => Route::Transactions,
            "chat" => Route::Chat,
            "export" => Route::Export,
            _ => Route::Dashboard,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "auth/login",
            Route::Register => "auth/register",
            Route::Dashboard => "dashboard",
            Route::Upload => "upload",
            Route::Transactions => "transactions",
            Route::Chat => "chat",
            Route::Export => "export",
        }
    }

    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login | Route::Register)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Allow(Route),
    Redirect(Route),
}

pub fn guard(session: &Session, route: Route) -> Navigation {
    guard_at(session, route, chrono::Utc::now().timestamp())
}

/// Evaluated at the moment of navigation; public routes always pass.
pub fn guard_at(session: &Session, route: Route, now: i64) -> Navigation {
    if !route.is_protected() || session.is_authenticated_at(now) {
        return Navigation::Allow(route);
    }
    info!(route = route.path(), "not authenticated, redirecting to login");
    Navigation::Redirect(Route::Login)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_resolve_with_dashboard_fallback() {
        assert_eq!(Route::resolve(""), Route::Dashboard);
        assert_eq!(Route::resolve("/auth/login"), Route::Login);
        assert_eq!(Route::resolve("upload"), Route::Upload);
        assert_eq!(Route::resolve("nowhere"), Route::Dashboard);
    }

    #[test]
    fn only_auth_pages_are_public() {
        assert!(!Route::Login.is_protected());
        assert!(!Route::Register.is_protected());
        assert!(Route::Dashboard.is_protected());
        assert!(Route::Upload.is_protected());
        assert!(Route::Chat.is_protected());
    }
}
