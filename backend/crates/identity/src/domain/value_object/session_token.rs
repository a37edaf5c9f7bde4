//! Session Token Value Object
//!
//! Opaque mock token: a fixed prefix followed by random alphanumerics.
//! It is never validated against anything.

use derive_more::Display;
use platform::crypto::random_alphanumeric;
use serde::{Deserialize, Serialize};

/// Default token prefix
pub const TOKEN_PREFIX: &str = "mock_jwt_";

/// Default number of random characters after the prefix
pub const TOKEN_RANDOM_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(transparent)]
#[display("{_0}")]
pub struct SessionToken(String);

impl SessionToken {
    /// Mint a new token
    pub fn mint(prefix: &str, random_len: usize) -> Self {
        Self(format!("{prefix}{}", random_alphanumeric(random_len)))
    }

    /// Wrap an existing value (e.g. read back from storage)
    #[inline]
    pub fn from_string(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the token is `prefix` followed by exactly `random_len` alphanumerics
    pub fn matches_format(&self, prefix: &str, random_len: usize) -> bool {
        self.0.strip_prefix(prefix).is_some_and(|rest| {
            rest.len() == random_len && rest.chars().all(|c| c.is_ascii_alphanumeric())
        })
    }
}
