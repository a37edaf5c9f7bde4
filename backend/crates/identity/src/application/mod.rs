//! Application Layer
//!
//! Identity service, login flow and dashboard controllers.

pub mod authenticator;
pub mod config;
pub mod dashboard;
pub mod identity_service;
pub mod login_flow;

// Re-exports
pub use authenticator::{Authenticator, LocalAuthenticator};
pub use config::{IdentityConfig, RemoteProfileConfig};
pub use dashboard::{Activation, DashboardController, DashboardView, format_timestamp};
pub use identity_service::IdentityService;
pub use login_flow::{LoginEntry, LoginFlowController, LoginFlowState, LoginView, SubmitOutcome};
