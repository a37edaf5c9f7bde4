//! Shared Kernel - Domain-crossing minimal core
//!
//! Error vocabulary shared by every crate in the workspace:
//! - [`error::kind::ErrorKind`] classification
//! - [`error::app_error::AppError`] user-facing error with optional action
//!
//! Only things with the same meaning across all crates belong here.

pub mod error {
    pub mod app_error;
    pub mod kind;
}
