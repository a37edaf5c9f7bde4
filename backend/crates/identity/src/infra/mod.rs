//! Infrastructure Layer
//!
//! Storage-backed session store and the remote profile adapter.

pub mod kv_session_store;
pub mod remote_profile;

pub use kv_session_store::KvSessionStore;
pub use remote_profile::{RemoteDashboard, RemoteProfile, RemoteProfileClient};
