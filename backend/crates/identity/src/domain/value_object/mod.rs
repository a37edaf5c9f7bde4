//! Value Object Module

pub mod identifier;
pub mod session_token;
pub mod verification_code;
