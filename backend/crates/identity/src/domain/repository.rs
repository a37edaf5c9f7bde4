//! Repository Traits
//!
//! Interface for session persistence. Implementation is in infrastructure layer.

use crate::domain::entity::session_record::SessionRecord;
use crate::error::IdentityResult;

/// Session store trait
///
/// A single fixed slot: at most one record exists, and `put` replaces it.
#[trait_variant::make(SessionStore: Send)]
pub trait LocalSessionStore {
    /// Replace the stored record
    async fn put(&self, record: &SessionRecord) -> IdentityResult<()>;

    /// Read the stored record
    ///
    /// Missing, unreadable or malformed content is reported as `None`.
    async fn get(&self) -> Option<SessionRecord>;

    /// Empty the slot. Clearing an empty slot succeeds.
    async fn clear(&self) -> IdentityResult<()>;
}
