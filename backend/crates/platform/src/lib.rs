//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no identity semantics:
//! - Key-value slot storage (file and in-memory backends)
//! - Injectable delays for simulated latency
//! - Random string / code helpers

pub mod crypto;
pub mod delay;
pub mod storage;
