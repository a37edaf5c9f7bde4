//! Login Flow Use Case
//!
//! Drives the login screen: `Idle -> Verifying -> Approving -> Success`,
//! then a redirect to the dashboard.
//!
//! - Validation failures stay in `Idle` and never reach the authenticator.
//! - The verification code is shown at the moment `login` is issued.
//! - A login failure returns to `Idle` with a generic message.
//! - Submissions while not `Idle` are ignored, so two flows never race on the
//!   session slot.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use derive_more::Display;
use kernel::error::app_error::AppError;
use platform::delay::Sleeper;
use tokio::sync::watch;

use crate::application::authenticator::Authenticator;
use crate::application::config::IdentityConfig;
use crate::domain::entity::user_profile::UserProfile;
use crate::domain::value_object::identifier::Identifier;
use crate::domain::value_object::verification_code::VerificationCode;
use crate::error::IdentityError;
use crate::presentation::route::{Navigator, Route};

/// Login screen state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum LoginFlowState {
    #[default]
    #[display("idle")]
    Idle,
    #[display("verifying")]
    Verifying,
    #[display("approving")]
    Approving,
    #[display("success")]
    Success,
}

/// Snapshot of everything the login screen renders
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginView {
    pub state: LoginFlowState,
    pub verification_code: Option<VerificationCode>,
    pub error_message: Option<String>,
    /// "Where do I find my ID?" helper
    pub show_helper: bool,
}

/// Result of one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Logged in and redirected to the dashboard
    Completed(UserProfile),
    /// Identifier failed validation, still idle
    Rejected,
    /// Login failed, back to idle
    Failed,
    /// A flow was already running
    Ignored,
}

/// Result of opening the login screen
pub enum LoginEntry<A, D, N>
where
    A: Authenticator,
    D: Sleeper,
    N: Navigator,
{
    /// Already logged in; redirected to the dashboard
    AlreadyAuthenticated,
    Ready(LoginFlowController<A, D, N>),
}

/// Login flow controller
pub struct LoginFlowController<A, D, N>
where
    A: Authenticator,
    D: Sleeper,
    N: Navigator,
{
    identity: Arc<A>,
    sleeper: Arc<D>,
    navigator: Arc<N>,
    config: Arc<IdentityConfig>,
    view: Mutex<LoginView>,
    state_tx: watch::Sender<LoginFlowState>,
}

impl<A, D, N> LoginFlowController<A, D, N>
where
    A: Authenticator + Send + Sync,
    D: Sleeper + Send + Sync,
    N: Navigator,
{
    /// Open the login screen, skipping it when a session already exists
    pub fn open(
        identity: Arc<A>,
        sleeper: Arc<D>,
        navigator: Arc<N>,
        config: Arc<IdentityConfig>,
    ) -> LoginEntry<A, D, N> {
        if identity.is_authenticated() {
            tracing::info!("Session present, skipping login");
            navigator.navigate(Route::Dashboard);
            return LoginEntry::AlreadyAuthenticated;
        }

        let (state_tx, _) = watch::channel(LoginFlowState::Idle);

        LoginEntry::Ready(Self {
            identity,
            sleeper,
            navigator,
            config,
            view: Mutex::new(LoginView::default()),
            state_tx,
        })
    }

    pub fn state(&self) -> LoginFlowState {
        *self.state_tx.borrow()
    }

    /// Receiver that observes every state change
    pub fn subscribe_state(&self) -> watch::Receiver<LoginFlowState> {
        self.state_tx.subscribe()
    }

    pub fn view(&self) -> LoginView {
        self.lock_view().clone()
    }

    pub fn toggle_helper(&self) {
        let mut view = self.lock_view();
        view.show_helper = !view.show_helper;
    }

    /// Run the whole flow for `raw_identifier`
    pub async fn submit(&self, raw_identifier: &str) -> SubmitOutcome {
        // Claim the machine and validate in one critical section
        let identifier = {
            let mut view = self.lock_view();
            if view.state != LoginFlowState::Idle {
                tracing::debug!(state = %view.state, "Submission ignored");
                IdentityError::FlowBusy.log();
                return SubmitOutcome::Ignored;
            }

            view.error_message = None;

            let identifier =
                match Identifier::parse(raw_identifier, &self.config.identifier_policy) {
                    Ok(identifier) => identifier,
                    Err(err) => {
                        err.log();
                        view.error_message = Some(err.to_app_error().user_message());
                        return SubmitOutcome::Rejected;
                    }
                };

            tracing::debug!(
                length = identifier.normalized().len(),
                "Identifier accepted"
            );
            self.transition(&mut view, LoginFlowState::Verifying);
            identifier
        };

        self.sleeper.sleep(self.config.verify_delay).await;

        {
            let code = self.identity.generate_verification_code();
            let mut view = self.lock_view();
            view.verification_code = Some(code);
            self.transition(&mut view, LoginFlowState::Approving);
        }

        // The input as typed is what the profile carries
        match self.identity.login(identifier.raw()).await {
            Ok(profile) => {
                self.transition(&mut self.lock_view(), LoginFlowState::Success);
                self.sleeper.sleep(self.config.success_hold).await;
                self.navigator.navigate(Route::Dashboard);
                SubmitOutcome::Completed(profile)
            }
            Err(err) => {
                err.log();
                let failure = AppError::new(err.kind(), "Authentication failed.")
                    .with_action("Please try again.")
                    .with_source(err);

                let mut view = self.lock_view();
                view.verification_code = None;
                view.show_helper = false;
                view.error_message = Some(failure.user_message());
                self.transition(&mut view, LoginFlowState::Idle);
                SubmitOutcome::Failed
            }
        }
    }

    fn transition(&self, view: &mut LoginView, next: LoginFlowState) {
        tracing::debug!(from = %view.state, to = %next, "Login flow transition");
        view.state = next;
        self.state_tx.send_replace(next);
    }

    fn lock_view(&self) -> MutexGuard<'_, LoginView> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
