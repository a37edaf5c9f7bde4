//! Application Configuration
//!
//! Configuration for the Identity application layer.

use std::time::Duration;

use crate::domain::value_object::identifier::IdentifierPolicy;
use crate::domain::value_object::session_token::{TOKEN_PREFIX, TOKEN_RANDOM_LEN};

/// Default key of the session slot
pub const SESSION_STORAGE_KEY: &str = "uaepass_mock_session";

/// Identity application configuration
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Key of the single session slot
    pub storage_key: String,
    /// Prefix of minted tokens
    pub token_prefix: String,
    /// Random characters after the prefix
    pub token_random_len: usize,
    /// Descriptive session lifetime (1 hour)
    pub session_ttl: Duration,
    /// Simulated provider latency inside `login`
    pub login_latency: Duration,
    /// "Contacting identity provider" stage of the login flow
    pub verify_delay: Duration,
    /// Time the success state stays visible before redirecting
    pub success_hold: Duration,
    /// Simulated dashboard loading time
    pub dashboard_load_delay: Duration,
    /// Identifier validation policy
    pub identifier_policy: IdentifierPolicy,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            storage_key: SESSION_STORAGE_KEY.to_string(),
            token_prefix: TOKEN_PREFIX.to_string(),
            token_random_len: TOKEN_RANDOM_LEN,
            session_ttl: Duration::from_secs(3600), // 1 hour
            login_latency: Duration::from_millis(1500),
            verify_delay: Duration::from_millis(1200),
            success_hold: Duration::from_millis(800),
            dashboard_load_delay: Duration::from_millis(600),
            identifier_policy: IdentifierPolicy::STRICT,
        }
    }
}

impl IdentityConfig {
    /// Use a different minimum identifier length
    pub fn with_min_identifier_length(min_length: usize) -> Self {
        Self {
            identifier_policy: IdentifierPolicy::new(min_length),
            ..Default::default()
        }
    }

    /// Lenient identifier policy (min 5, non-empty)
    pub fn lenient() -> Self {
        Self {
            identifier_policy: IdentifierPolicy::LENIENT,
            ..Default::default()
        }
    }
}

/// Remote profile endpoint configuration
#[derive(Debug, Clone)]
pub struct RemoteProfileConfig {
    /// Base URL of the backend, without trailing slash
    pub base_url: String,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for RemoteProfileConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl RemoteProfileConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// `GET` endpoint returning the current profile
    pub fn me_url(&self) -> String {
        format!("{}/auth/me", self.base())
    }

    /// Navigation target that ends the remote session
    pub fn logout_url(&self) -> String {
        format!("{}/auth/logout", self.base())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IdentityConfig::default();

        assert_eq!(config.storage_key, "uaepass_mock_session");
        assert_eq!(config.token_prefix, "mock_jwt_");
        assert_eq!(config.token_random_len, 32);
        assert_eq!(config.session_ttl, Duration::from_secs(3600));
        assert_eq!(config.login_latency, Duration::from_millis(1500));
        assert_eq!(config.verify_delay, Duration::from_millis(1200));
        assert_eq!(config.success_hold, Duration::from_millis(800));
        assert_eq!(config.dashboard_load_delay, Duration::from_millis(600));
        assert_eq!(config.identifier_policy.min_length, 10);
    }

    #[test]
    fn test_policy_constructors() {
        assert_eq!(IdentityConfig::lenient().identifier_policy.min_length, 5);
        assert_eq!(
            IdentityConfig::with_min_identifier_length(7)
                .identifier_policy
                .min_length,
            7
        );
    }

    #[test]
    fn test_remote_urls() {
        let config = RemoteProfileConfig::new("https://sp.example.ae/");
        assert_eq!(config.me_url(), "https://sp.example.ae/auth/me");
        assert_eq!(config.logout_url(), "https://sp.example.ae/auth/logout");
    }
}
