//! Domain Layer
//!
//! Contains entities, value objects, and the session store trait.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    session_record::{SessionInfo, SessionRecord},
    user_profile::UserProfile,
};
pub use repository::SessionStore;
