//! Route Guard
//!
//! Consulted before entering a protected route. Reads AuthState through a
//! `watch` receiver and never changes it.

use tokio::sync::watch;

use crate::presentation::route::{Navigator, Route};

/// Outcome of a guard check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(Route),
}

/// Guard for protected routes
#[derive(Debug, Clone)]
pub struct RouteGuard {
    auth_state: watch::Receiver<bool>,
    redirect_to: Route,
}

impl RouteGuard {
    /// Guard that sends unauthenticated users to [`Route::Entry`]
    pub fn new(auth_state: watch::Receiver<bool>) -> Self {
        Self {
            auth_state,
            redirect_to: Route::Entry,
        }
    }

    /// Decide without side effects
    pub fn check(&self, target: &Route) -> GuardDecision {
        if !target.is_protected() || *self.auth_state.borrow() {
            GuardDecision::Allow
        } else {
            GuardDecision::Redirect(self.redirect_to.clone())
        }
    }

    /// Decide and perform the redirect if denied
    pub fn can_activate<N>(&self, target: &Route, navigator: &N) -> bool
    where
        N: Navigator + ?Sized,
    {
        match self.check(target) {
            GuardDecision::Allow => true,
            GuardDecision::Redirect(route) => {
                tracing::debug!(
                    target = target.path(),
                    redirect = route.path(),
                    "Guard denied navigation"
                );
                navigator.navigate(route);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::route::HistoryNavigator;

    #[test]
    fn test_denies_and_redirects_without_session() {
        let (_tx, rx) = watch::channel(false);
        let guard = RouteGuard::new(rx);
        let nav = HistoryNavigator::new();

        assert_eq!(
            guard.check(&Route::Dashboard),
            GuardDecision::Redirect(Route::Entry)
        );
        assert!(!guard.can_activate(&Route::Dashboard, &nav));
        assert_eq!(nav.history(), vec![Route::Entry]);
    }

    #[test]
    fn test_allows_with_session() {
        let (_tx, rx) = watch::channel(true);
        let guard = RouteGuard::new(rx);
        let nav = HistoryNavigator::new();

        assert!(guard.can_activate(&Route::Dashboard, &nav));
        assert!(nav.history().is_empty());
    }

    #[test]
    fn test_follows_flag_changes() {
        let (tx, rx) = watch::channel(false);
        let guard = RouteGuard::new(rx);

        assert_ne!(guard.check(&Route::Dashboard), GuardDecision::Allow);
        tx.send_replace(true);
        assert_eq!(guard.check(&Route::Dashboard), GuardDecision::Allow);
        tx.send_replace(false);
        assert_ne!(guard.check(&Route::Dashboard), GuardDecision::Allow);
    }

    #[test]
    fn test_unprotected_routes_always_allowed() {
        let (_tx, rx) = watch::channel(false);
        let guard = RouteGuard::new(rx);

        assert_eq!(guard.check(&Route::Entry), GuardDecision::Allow);
        assert_eq!(
            guard.check(&Route::External("https://x/auth/logout".into())),
            GuardDecision::Allow
        );
    }
}
