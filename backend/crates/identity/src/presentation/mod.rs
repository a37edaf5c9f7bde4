//! Presentation Layer
//!
//! Routes, navigation and the route guard.

pub mod guard;
pub mod route;

pub use guard::{GuardDecision, RouteGuard};
pub use route::{HistoryNavigator, Navigator, Route};
