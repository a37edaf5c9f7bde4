//! Random Value Helpers
//!
//! Not cryptographic tokens: these only produce opaque-looking strings and
//! display codes for the simulated identity provider.

use std::ops::RangeInclusive;

use rand::Rng;
use rand::distr::Alphanumeric;

/// Random string over `[A-Za-z0-9]`
pub fn random_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Uniform integer in `range`
pub fn random_in_range(range: RangeInclusive<u32>) -> u32 {
    rand::rng().random_range(range)
}
