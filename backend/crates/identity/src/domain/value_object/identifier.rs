//! Identifier Value Object
//!
//! The national-ID-like string a user submits to authenticate.
//!
//! ## Normalization
//! Separators (hyphens and any whitespace) are stripped before the length
//! check. The raw input is kept as typed; it is what ends up in the profile.
//!
//! ## Policy
//! The minimum normalized length is a policy value, see [`IdentifierPolicy`].
//! An empty normalized value is rejected under every policy.

use crate::error::{IdentityError, IdentityResult};

/// Minimum normalized length of the strict policy (the default)
pub const STRICT_MIN_LENGTH: usize = 10;

/// Minimum normalized length of the lenient policy
pub const LENIENT_MIN_LENGTH: usize = 5;

/// Identifier validation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentifierPolicy {
    /// Minimum number of characters after separators are stripped
    pub min_length: usize,
}

impl IdentifierPolicy {
    pub const STRICT: Self = Self {
        min_length: STRICT_MIN_LENGTH,
    };

    pub const LENIENT: Self = Self {
        min_length: LENIENT_MIN_LENGTH,
    };

    pub const fn new(min_length: usize) -> Self {
        Self { min_length }
    }
}

impl Default for IdentifierPolicy {
    fn default() -> Self {
        Self::STRICT
    }
}

/// Validated identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    raw: String,
    normalized: String,
}

impl Identifier {
    /// Strip hyphens and whitespace
    pub fn normalize(raw: &str) -> String {
        raw.chars()
            .filter(|c| *c != '-' && !c.is_whitespace())
            .collect()
    }

    /// Normalize and check against `policy`
    pub fn parse(raw: &str, policy: &IdentifierPolicy) -> IdentityResult<Self> {
        let normalized = Self::normalize(raw);
        let length = normalized.chars().count();

        if length == 0 || length < policy.min_length {
            return Err(IdentityError::InvalidIdentifier {
                length,
                minimum: policy.min_length.max(1),
            });
        }

        Ok(Self {
            raw: raw.to_string(),
            normalized,
        })
    }

    /// Input as typed
    #[inline]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Input without separators
    #[inline]
    pub fn normalized(&self) -> &str {
        &self.normalized
    }
}
