//! Identity (Mock National Digital Identity) Client Module
//!
//! Clean Architecture structure:
//! - `domain/` - Profile and session entities, value objects, store trait
//! - `application/` - Identity service, login flow and dashboard controllers
//! - `infra/` - Key-value session store, remote profile adapter
//! - `presentation/` - Routes, navigator and the route guard
//!
//! ## Features
//! - Simulated login against a national ID provider with phone approval
//! - One persisted session slot surviving restarts
//! - Observable authentication flag gating protected routes
//!
//! ## Session Model
//! - The identity service is the only writer of the session slot
//! - Unreadable or malformed slot content counts as "no session"
//! - Expiry is informational and never enforced

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::authenticator::Authenticator;
pub use application::config::{IdentityConfig, RemoteProfileConfig};
pub use application::identity_service::IdentityService;
pub use error::{IdentityError, IdentityResult};
pub use infra::kv_session_store::KvSessionStore;
pub use presentation::guard::RouteGuard;

// Re-export kernel error types for unified error handling
pub use kernel::error::{app_error::AppError, kind::ErrorKind};
