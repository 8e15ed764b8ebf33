//! Proof module: canonical hashing, canonical JSON, replay verification.

pub mod canon;
pub mod hash;
pub mod hash_domain;
pub mod replay;
