//! Key-Value Session Store
//!
//! [`SessionStore`] over a `platform` key-value slot. The record is kept as
//! JSON under one fixed key.

use platform::storage::KeyValueStore;

use crate::domain::entity::session_record::SessionRecord;
use crate::domain::repository::SessionStore;
use crate::error::IdentityResult;

/// Session store backed by a key-value slot
#[derive(Debug, Clone)]
pub struct KvSessionStore<K> {
    kv: K,
    key: String,
}

impl<K> KvSessionStore<K>
where
    K: KeyValueStore + Sync,
{
    pub fn new(kv: K, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<K> SessionStore for KvSessionStore<K>
where
    K: KeyValueStore + Sync,
{
    async fn put(&self, record: &SessionRecord) -> IdentityResult<()> {
        let json = serde_json::to_string(record)?;
        self.kv.set_item(&self.key, &json).await?;
        Ok(())
    }

    async fn get(&self) -> Option<SessionRecord> {
        let raw = match self.kv.get_item(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, key = %self.key, "Session slot unreadable");
                return None;
            }
        };

        match serde_json::from_str::<SessionRecord>(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(error = %e, key = %self.key, "Discarding malformed session record");
                None
            }
        }
    }

    async fn clear(&self) -> IdentityResult<()> {
        self.kv.remove_item(&self.key).await?;
        Ok(())
    }
}
