//! In-app routes and the navigation seam
//!
//! The session store only ever asks to go somewhere through [`Navigator`];
//! the desktop shell decides when to actually switch views.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    /// Post-auth landing page
    Dashboard,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Dashboard => "/dashboard",
        }
    }

    pub fn requires_auth(self) -> bool {
        matches!(self, Self::Dashboard)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that parks the most recent request until the UI picks it up.
#[derive(Debug, Clone, Default)]
pub struct PendingRoute {
    slot: Arc<Mutex<Option<Route>>>,
}

impl PendingRoute {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Option<Route> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl Navigator for PendingRoute {
    fn navigate(&self, route: Route) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Login.path(), "/login");
        assert_eq!(Route::Register.path(), "/register");
        assert_eq!(Route::Dashboard.to_string(), "/dashboard");
    }

    #[test]
    fn test_only_dashboard_requires_auth() {
        assert!(Route::Dashboard.requires_auth());
        assert!(!Route::Login.requires_auth());
        assert!(!Route::Register.requires_auth());
    }

    #[test]
    fn test_pending_route_keeps_latest_and_drains() {
        let pending = PendingRoute::new();
        let navigator: Arc<dyn Navigator> = Arc::new(pending.clone());

        navigator.navigate(Route::Dashboard);
        navigator.navigate(Route::Login);

        assert_eq!(pending.take(), Some(Route::Login));
        assert_eq!(pending.take(), None);
    }
}
