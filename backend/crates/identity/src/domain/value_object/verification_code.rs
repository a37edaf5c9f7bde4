//! Verification Code Value Object
//!
//! Cosmetic 4-digit code shown while waiting for phone approval. Nothing
//! ever checks it.

use derive_more::Display;
use platform::crypto::random_in_range;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{_0}")]
pub struct VerificationCode(String);

impl VerificationCode {
    pub const MIN: u32 = 1000;
    pub const MAX: u32 = 9999;

    /// Uniformly random code in `[MIN, MAX]`
    pub fn generate() -> Self {
        Self(random_in_range(Self::MIN..=Self::MAX).to_string())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_four_digits_in_range() {
        for _ in 0..2_000 {
            let code = VerificationCode::generate();
            assert_eq!(code.as_str().len(), 4);
            assert!(code.as_str().chars().all(|c| c.is_ascii_digit()));

            let value: u32 = code.as_str().parse().unwrap();
            assert!((VerificationCode::MIN..=VerificationCode::MAX).contains(&value));
        }
    }
}
