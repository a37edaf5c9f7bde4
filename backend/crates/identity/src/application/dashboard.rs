//! Dashboard Use Case
//!
//! Local variant: profile and session info come from the session store via
//! the authenticator. The remote `/auth/me` variant lives in
//! `infra::remote_profile` as an adapter.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Local, TimeZone, Utc};
use platform::delay::Sleeper;

use crate::application::authenticator::Authenticator;
use crate::application::config::IdentityConfig;
use crate::domain::entity::session_record::SessionInfo;
use crate::domain::entity::user_profile::UserProfile;
use crate::error::IdentityResult;
use crate::presentation::route::{Navigator, Route};

/// Display format for session timestamps, e.g. `10/17/2026, 8:05:09 AM`
pub const TIMESTAMP_DISPLAY_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// What the dashboard renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub loading: bool,
    pub profile: Option<UserProfile>,
    pub session: Option<SessionInfo>,
}

impl Default for DashboardView {
    fn default() -> Self {
        Self {
            loading: true,
            profile: None,
            session: None,
        }
    }
}

/// Result of activating the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Loaded,
    /// Not authenticated; sent to the entry page
    Redirected,
}

/// Dashboard controller
pub struct DashboardController<A, D, N>
where
    A: Authenticator,
    D: Sleeper,
    N: Navigator,
{
    identity: Arc<A>,
    sleeper: Arc<D>,
    navigator: Arc<N>,
    config: Arc<IdentityConfig>,
    view: Mutex<DashboardView>,
}

impl<A, D, N> DashboardController<A, D, N>
where
    A: Authenticator + Send + Sync,
    D: Sleeper + Send + Sync,
    N: Navigator,
{
    pub fn new(
        identity: Arc<A>,
        sleeper: Arc<D>,
        navigator: Arc<N>,
        config: Arc<IdentityConfig>,
    ) -> Self {
        Self {
            identity,
            sleeper,
            navigator,
            config,
            view: Mutex::new(DashboardView::default()),
        }
    }

    pub async fn activate(&self) -> Activation {
        if !self.identity.is_authenticated() {
            self.navigator.navigate(Route::Entry);
            return Activation::Redirected;
        }

        self.sleeper.sleep(self.config.dashboard_load_delay).await;

        let profile = self.identity.get_profile().await;
        let session = self.identity.get_session_info().await;

        tracing::debug!(has_profile = profile.is_some(), "Dashboard loaded");

        let mut view = self.lock_view();
        view.profile = profile;
        view.session = session;
        view.loading = false;
        Activation::Loaded
    }

    pub fn view(&self) -> DashboardView {
        self.lock_view().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock_view().loading
    }

    /// End the session and go back to the entry page
    pub async fn logout(&self) -> IdentityResult<()> {
        self.identity.logout().await?;
        *self.lock_view() = DashboardView::default();
        self.navigator.navigate(Route::Entry);
        Ok(())
    }

    /// Login time in local time, empty when nothing is loaded
    pub fn formatted_login_time(&self) -> String {
        self.lock_view()
            .session
            .as_ref()
            .map(|info| format_timestamp(&info.login_time, &Local))
            .unwrap_or_default()
    }

    /// Expiry in local time, empty when nothing is loaded
    pub fn formatted_expiry(&self) -> String {
        self.lock_view()
            .session
            .as_ref()
            .map(|info| format_timestamp(&info.expires_at, &Local))
            .unwrap_or_default()
    }

    fn lock_view(&self) -> MutexGuard<'_, DashboardView> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Render `ts` in `tz` with [`TIMESTAMP_DISPLAY_FORMAT`]
pub fn format_timestamp<Tz: TimeZone>(ts: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    ts.with_timezone(tz)
        .format(TIMESTAMP_DISPLAY_FORMAT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp() {
        let morning = Utc.with_ymd_and_hms(2026, 10, 17, 8, 5, 9).single().unwrap();
        assert_eq!(format_timestamp(&morning, &Utc), "10/17/2026, 8:05:09 AM");

        let evening = Utc.with_ymd_and_hms(2026, 1, 2, 21, 0, 0).single().unwrap();
        assert_eq!(format_timestamp(&evening, &Utc), "1/2/2026, 9:00:00 PM");
    }

    #[test]
    fn test_view_starts_loading() {
        let view = DashboardView::default();
        assert!(view.loading);
        assert!(view.profile.is_none());
        assert!(view.session.is_none());
    }
}
