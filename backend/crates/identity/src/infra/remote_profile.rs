//! Remote Profile Adapter
//!
//! Dashboard variant that loads the profile from `GET /auth/me` on the
//! service provider backend instead of the local session slot. The backend
//! session rides on cookies, so the client keeps a cookie store.
//!
//! Failures are shown to the user and never trigger a redirect. Logout is a
//! full navigation to the backend's logout endpoint.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use uuid::Uuid;

use crate::application::config::RemoteProfileConfig;
use crate::error::{IdentityError, IdentityResult};
use crate::presentation::route::{Navigator, Route};

/// Public profile returned by `/auth/me`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteProfile {
    pub id: Uuid,
    #[serde(default)]
    pub full_name_en: Option<String>,
    #[serde(default)]
    pub full_name_ar: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub user_type: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub linked_at: Option<DateTime<FixedOffset>>,
}

/// HTTP client for the profile endpoint
#[derive(Debug, Clone)]
pub struct RemoteProfileClient {
    http: reqwest::Client,
    config: Arc<RemoteProfileConfig>,
}

impl RemoteProfileClient {
    pub fn new(config: Arc<RemoteProfileConfig>) -> IdentityResult<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self { http, config })
    }

    /// Fetch the signed-in user's profile
    pub async fn fetch_me(&self) -> IdentityResult<RemoteProfile> {
        let url = self.config.me_url();
        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(IdentityError::RemoteStatus(response.status().as_u16()));
        }

        let profile = response.json::<RemoteProfile>().await?;
        tracing::debug!(id = %profile.id, "Remote profile loaded");
        Ok(profile)
    }

    pub fn logout_url(&self) -> String {
        self.config.logout_url()
    }
}

/// What the remote dashboard renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteDashboardView {
    pub loading: bool,
    pub profile: Option<RemoteProfile>,
    pub error_message: Option<String>,
}

impl Default for RemoteDashboardView {
    fn default() -> Self {
        Self {
            loading: true,
            profile: None,
            error_message: None,
        }
    }
}

/// Dashboard backed by the remote profile endpoint
pub struct RemoteDashboard<N: Navigator> {
    client: RemoteProfileClient,
    navigator: Arc<N>,
    view: Mutex<RemoteDashboardView>,
}

impl<N: Navigator> RemoteDashboard<N> {
    pub fn new(client: RemoteProfileClient, navigator: Arc<N>) -> Self {
        Self {
            client,
            navigator,
            view: Mutex::new(RemoteDashboardView::default()),
        }
    }

    /// Load the profile; on failure keep a retryable message and stay put
    pub async fn load(&self) -> bool {
        {
            let mut view = self.lock_view();
            view.loading = true;
            view.error_message = None;
        }

        let result = self.client.fetch_me().await;

        let mut view = self.lock_view();
        view.loading = false;
        match result {
            Ok(profile) => {
                view.profile = Some(profile);
                true
            }
            Err(err) => {
                err.log();
                view.error_message = Some(err.to_app_error().user_message());
                false
            }
        }
    }

    pub fn view(&self) -> RemoteDashboardView {
        self.lock_view().clone()
    }

    /// Leave for the backend logout endpoint
    pub fn logout(&self) {
        self.navigator
            .navigate(Route::External(self.client.logout_url()));
    }

    fn lock_view(&self) -> MutexGuard<'_, RemoteDashboardView> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::route::HistoryNavigator;
    use std::time::Duration;

    #[test]
    fn test_profile_deserialization() {
        let json = r#"{
            "id": "7f1e3c2a-5b4d-4e6f-8a9b-0c1d2e3f4a5b",
            "fullNameEn": "Ahmed Mohammed Al Mansoori",
            "fullNameAr": "أحمد محمد المنصوري",
            "email": "ahmed.almansoori@example.ae",
            "mobile": "+971501234567",
            "userType": "SOP3",
            "nationality": "ARE",
            "linkedAt": "2026-10-17T08:05:09.000Z"
        }"#;

        let profile: RemoteProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.full_name_en.as_deref(), Some("Ahmed Mohammed Al Mansoori"));
        assert_eq!(profile.user_type.as_deref(), Some("SOP3"));
        assert_eq!(
            profile.linked_at.unwrap().to_rfc3339(),
            "2026-10-17T08:05:09+00:00"
        );
    }

    #[test]
    fn test_profile_optional_fields() {
        let json = r#"{"id":"7f1e3c2a-5b4d-4e6f-8a9b-0c1d2e3f4a5b","email":null}"#;

        let profile: RemoteProfile = serde_json::from_str(json).unwrap();
        assert!(profile.email.is_none());
        assert!(profile.linked_at.is_none());
    }

    fn unreachable_client() -> RemoteProfileClient {
        let config = RemoteProfileConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            request_timeout: Duration::from_secs(2),
        };
        RemoteProfileClient::new(Arc::new(config)).unwrap()
    }

    #[tokio::test]
    async fn test_load_failure_shows_error_without_redirect() {
        let nav = Arc::new(HistoryNavigator::new());
        let dashboard = RemoteDashboard::new(unreachable_client(), nav.clone());

        assert!(!dashboard.load().await);

        let view = dashboard.view();
        assert!(!view.loading);
        assert!(view.profile.is_none());
        assert_eq!(
            view.error_message.as_deref(),
            Some("Unable to load your profile. Please try again.")
        );
        assert!(nav.history().is_empty());
    }

    #[test]
    fn test_logout_navigates_to_backend() {
        let nav = Arc::new(HistoryNavigator::new());
        let dashboard = RemoteDashboard::new(unreachable_client(), nav.clone());

        dashboard.logout();

        assert_eq!(
            nav.current(),
            Some(Route::External("http://127.0.0.1:1/auth/logout".into()))
        );
    }
}
