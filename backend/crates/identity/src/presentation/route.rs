//! Routes and Navigation
//!
//! Destinations the controllers redirect to, and the [`Navigator`] seam that
//! performs the redirect.

use std::sync::{Mutex, PoisonError};

/// Navigation destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Entry / login page
    Entry,
    /// Protected dashboard
    Dashboard,
    /// Full navigation away from the client (remote logout)
    External(String),
}

impl Route {
    pub fn path(&self) -> &str {
        match self {
            Route::Entry => "/",
            Route::Dashboard => "/dashboard",
            Route::External(url) => url,
        }
    }

    /// Routes that require an authenticated session
    #[inline]
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Dashboard)
    }
}

/// Performs navigation
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that records every navigation in order
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    history: Mutex<Vec<Route>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// All navigations so far
    pub fn history(&self) -> Vec<Route> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Most recent destination
    pub fn current(&self) -> Option<Route> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, route: Route) {
        tracing::debug!(path = route.path(), "Navigate");
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Route::Entry.path(), "/");
        assert_eq!(Route::Dashboard.path(), "/dashboard");
        assert_eq!(
            Route::External("https://idp.example/logout".into()).path(),
            "https://idp.example/logout"
        );
    }

    #[test]
    fn test_only_dashboard_is_protected() {
        assert!(Route::Dashboard.is_protected());
        assert!(!Route::Entry.is_protected());
        assert!(!Route::External("x".into()).is_protected());
    }

    #[test]
    fn test_history_navigator() {
        let nav = HistoryNavigator::new();
        assert_eq!(nav.current(), None);

        nav.navigate(Route::Dashboard);
        nav.navigate(Route::Entry);

        assert_eq!(nav.history(), vec![Route::Dashboard, Route::Entry]);
        assert_eq!(nav.current(), Some(Route::Entry));
    }
}
