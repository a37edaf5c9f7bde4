//! Authenticator Trait
//!
//! The operations views and controllers use. [`IdentityService`] is the
//! production implementation.
//!
//! [`IdentityService`]: crate::application::identity_service::IdentityService

use tokio::sync::watch;

use crate::domain::entity::{session_record::SessionInfo, user_profile::UserProfile};
use crate::domain::value_object::verification_code::VerificationCode;
use crate::error::IdentityResult;

#[trait_variant::make(Authenticator: Send)]
pub trait LocalAuthenticator {
    /// Current AuthState
    fn is_authenticated(&self) -> bool;

    /// Receiver that observes every AuthState change
    fn subscribe(&self) -> watch::Receiver<bool>;

    /// Cosmetic code for the approval screen
    fn generate_verification_code(&self) -> VerificationCode;

    /// Simulated login. Replaces any existing session.
    async fn login(&self, identifier: &str) -> IdentityResult<UserProfile>;

    /// Profile of the current session
    async fn get_profile(&self) -> Option<UserProfile>;

    /// Token and timestamps of the current session
    async fn get_session_info(&self) -> Option<SessionInfo>;

    /// Clear the session. Safe to call when logged out.
    async fn logout(&self) -> IdentityResult<()>;
}
