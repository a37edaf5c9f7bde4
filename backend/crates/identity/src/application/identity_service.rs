//! Identity Service
//!
//! Owns login/logout, token minting and the observable AuthState flag.
//!
//! AuthState is published on a `watch` channel. It is derived from the store
//! at construction and afterwards only changed by `login` (after the record is
//! written) and `logout` (after the slot is emptied). Reads never touch it.
//! `refresh` re-derives it explicitly, under the same lock as the writers.

use std::sync::Arc;

use platform::delay::Sleeper;
use tokio::sync::{Mutex, watch};

use crate::application::authenticator::Authenticator;
use crate::application::config::IdentityConfig;
use crate::domain::entity::session_record::{SessionInfo, SessionRecord};
use crate::domain::entity::user_profile::UserProfile;
use crate::domain::repository::SessionStore;
use crate::domain::value_object::session_token::SessionToken;
use crate::domain::value_object::verification_code::VerificationCode;
use crate::error::{IdentityError, IdentityResult};

/// Identity service
pub struct IdentityService<S, D>
where
    S: SessionStore,
    D: Sleeper,
{
    store: Arc<S>,
    sleeper: Arc<D>,
    config: Arc<IdentityConfig>,
    auth_state: watch::Sender<bool>,
    /// Serializes slot writes with their flag update
    write_lock: Mutex<()>,
}

impl<S, D> IdentityService<S, D>
where
    S: SessionStore + Send + Sync,
    D: Sleeper + Send + Sync,
{
    /// Build the service, deriving AuthState from what the store holds
    pub async fn restore(store: Arc<S>, sleeper: Arc<D>, config: Arc<IdentityConfig>) -> Self {
        let authenticated = store.get().await.is_some();
        let (auth_state, _) = watch::channel(authenticated);

        tracing::debug!(authenticated, "Identity service restored");

        Self {
            store,
            sleeper,
            config,
            auth_state,
            write_lock: Mutex::new(()),
        }
    }

    /// Re-derive AuthState from the store
    pub async fn refresh(&self) -> bool {
        let _guard = self.write_lock.lock().await;
        let present = self.store.get().await.is_some();
        let changed = self.auth_state.send_if_modified(|state| {
            let changed = *state != present;
            *state = present;
            changed
        });
        if changed {
            tracing::info!(authenticated = present, "AuthState re-derived from store");
        }
        present
    }

    pub fn config(&self) -> &IdentityConfig {
        &self.config
    }
}

impl<S, D> Authenticator for IdentityService<S, D>
where
    S: SessionStore + Send + Sync,
    D: Sleeper + Send + Sync,
{
    fn is_authenticated(&self) -> bool {
        *self.auth_state.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.auth_state.subscribe()
    }

    fn generate_verification_code(&self) -> VerificationCode {
        VerificationCode::generate()
    }

    async fn login(&self, identifier: &str) -> IdentityResult<UserProfile> {
        // Provider round trip and phone approval
        self.sleeper.sleep(self.config.login_latency).await;

        let ttl = chrono::Duration::from_std(self.config.session_ttl)
            .map_err(|e| IdentityError::Internal(format!("Invalid session TTL: {e}")))?;

        let profile = UserProfile::issue_for(identifier);
        let token = SessionToken::mint(&self.config.token_prefix, self.config.token_random_len);
        let record = SessionRecord::new(profile.clone(), token, ttl);

        {
            let _guard = self.write_lock.lock().await;
            self.store.put(&record).await?;
            self.auth_state.send_replace(true);
        }

        tracing::info!(
            login_time = %record.login_time,
            expires_at = %record.expires_at,
            "User signed in"
        );

        Ok(profile)
    }

    async fn get_profile(&self) -> Option<UserProfile> {
        self.store.get().await.map(|record| record.profile)
    }

    async fn get_session_info(&self) -> Option<SessionInfo> {
        self.store.get().await.map(|record| record.info())
    }

    async fn logout(&self) -> IdentityResult<()> {
        let _guard = self.write_lock.lock().await;
        self.store.clear().await?;
        let was_authenticated = self.auth_state.send_replace(false);

        tracing::info!(was_authenticated, "User signed out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::kv_session_store::KvSessionStore;
    use platform::delay::InstantSleeper;
    use platform::storage::{KeyValueStore, MemoryKeyValueStore};
    use std::time::Duration;

    type TestService = IdentityService<KvSessionStore<MemoryKeyValueStore>, InstantSleeper>;

    async fn service_over(kv: &MemoryKeyValueStore) -> (TestService, InstantSleeper) {
        let config = Arc::new(IdentityConfig::default());
        let sleeper = InstantSleeper::new();
        let store = Arc::new(KvSessionStore::new(kv.clone(), &config.storage_key));
        let service = IdentityService::restore(store, Arc::new(sleeper.clone()), config).await;
        (service, sleeper)
    }

    #[tokio::test]
    async fn test_starts_unauthenticated_on_empty_store() {
        let kv = MemoryKeyValueStore::new();
        let (service, _) = service_over(&kv).await;

        assert!(!service.is_authenticated());
        assert!(service.get_profile().await.is_none());
        assert!(service.get_session_info().await.is_none());
    }

    #[tokio::test]
    async fn test_login_persists_and_flips_flag() {
        let kv = MemoryKeyValueStore::new();
        let (service, sleeper) = service_over(&kv).await;
        let mut rx = service.subscribe();

        let profile = service.login("784-1990-1234567-1").await.unwrap();

        assert_eq!(profile.idn, "784-1990-1234567-1");
        assert!(service.is_authenticated());
        assert!(rx.has_changed().unwrap());
        assert!(*rx.borrow_and_update());
        assert_eq!(sleeper.requested(), vec![Duration::from_millis(1500)]);

        let raw = kv.get_item("uaepass_mock_session").await.unwrap().unwrap();
        assert!(raw.contains("\"idn\":\"784-1990-1234567-1\""));
    }

    #[tokio::test]
    async fn test_profile_is_template_with_identifier() {
        let kv = MemoryKeyValueStore::new();
        let (service, _) = service_over(&kv).await;

        service.login("784 2001 7654321 2").await.unwrap();
        let profile = service.get_profile().await.unwrap();

        let expected = UserProfile {
            idn: "784 2001 7654321 2".to_string(),
            ..UserProfile::template()
        };
        assert_eq!(profile, expected);
    }

    #[tokio::test]
    async fn test_session_info_token_and_expiry() {
        let kv = MemoryKeyValueStore::new();
        let (service, _) = service_over(&kv).await;

        service.login("7841990123456").await.unwrap();
        let info = service.get_session_info().await.unwrap();

        assert!(info.token.matches_format("mock_jwt_", 32));
        assert_eq!(info.expires_at - info.login_time, chrono::Duration::hours(1));
    }

    #[tokio::test]
    async fn test_second_login_replaces_session() {
        let kv = MemoryKeyValueStore::new();
        let (service, _) = service_over(&kv).await;

        service.login("1111111111").await.unwrap();
        let first = service.get_session_info().await.unwrap();
        service.login("2222222222").await.unwrap();
        let second = service.get_session_info().await.unwrap();

        assert_ne!(first.token, second.token);
        assert_eq!(service.get_profile().await.unwrap().idn, "2222222222");
        assert_eq!(kv.len().await, 1);
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let kv = MemoryKeyValueStore::new();
        let (service, _) = service_over(&kv).await;

        service.logout().await.unwrap();
        assert!(!service.is_authenticated());

        service.login("7841990123456").await.unwrap();
        service.logout().await.unwrap();
        service.logout().await.unwrap();

        assert!(!service.is_authenticated());
        assert!(service.get_profile().await.is_none());
        assert!(kv.is_empty().await);
    }

    #[tokio::test]
    async fn test_restore_picks_up_existing_session() {
        let kv = MemoryKeyValueStore::new();
        let (first, _) = service_over(&kv).await;
        first.login("7841990123456").await.unwrap();

        let (second, _) = service_over(&kv).await;
        assert!(second.is_authenticated());
        assert_eq!(second.get_profile().await.unwrap().idn, "7841990123456");
    }

    #[tokio::test]
    async fn test_corruption_reads_as_no_session() {
        let kv = MemoryKeyValueStore::new();
        let (service, _) = service_over(&kv).await;
        service.login("7841990123456").await.unwrap();

        let raw = kv.get_item("uaepass_mock_session").await.unwrap().unwrap();
        kv.set_item("uaepass_mock_session", &raw[..raw.len() / 2])
            .await
            .unwrap();

        assert!(service.get_profile().await.is_none());
        assert!(service.get_session_info().await.is_none());
        // Reads leave AuthState alone; refresh re-derives it
        assert!(service.is_authenticated());
        assert!(!service.refresh().await);
        assert!(!service.is_authenticated());

        let (restored, _) = service_over(&kv).await;
        assert!(!restored.is_authenticated());
    }

    #[tokio::test]
    async fn test_refresh_follows_store() {
        let kv = MemoryKeyValueStore::new();
        let (service, _) = service_over(&kv).await;
        service.login("7841990123456").await.unwrap();

        kv.remove_item("uaepass_mock_session").await.unwrap();
        assert!(!service.refresh().await);
        assert!(!service.is_authenticated());
    }

    #[tokio::test]
    async fn test_verification_code_does_not_touch_session() {
        let kv = MemoryKeyValueStore::new();
        let (service, sleeper) = service_over(&kv).await;

        for _ in 0..500 {
            let code = service.generate_verification_code();
            let value: u32 = code.as_str().parse().unwrap();
            assert!((1000..=9999).contains(&value));
        }

        assert!(!service.is_authenticated());
        assert!(kv.is_empty().await);
        assert!(sleeper.requested().is_empty());
    }
}
