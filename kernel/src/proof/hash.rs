//! Content hashes and the one place that computes them.
//!
//! Algorithm: SHA-256 over `domain_prefix || data`, rendered as
//! `"sha256:<64 lowercase hex digits>"`.

use std::fmt;

use sha2::{Digest, Sha256};

pub use super::hash_domain::HashDomain;

const PREFIX: &str = "sha256:";
const HEX_LEN: usize = 64;

/// A SHA-256 content hash in its textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash(String);

impl ContentHash {
    /// Accept only `"sha256:"` followed by 64 lowercase hex digits.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let hex = s.strip_prefix(PREFIX)?;
        let well_formed = hex.len() == HEX_LEN
            && hex
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        well_formed.then(|| Self(s.to_string()))
    }

    #[must_use]
    pub fn algorithm(&self) -> &'static str {
        "sha256"
    }

    #[must_use]
    pub fn hex_digest(&self) -> &str {
        &self.0[PREFIX.len()..]
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hash `data` under `domain`.
#[must_use]
pub fn canonical_hash(domain: HashDomain, data: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(domain.as_bytes());
    hasher.update(data);
    ContentHash(format!("{PREFIX}{}", hex::encode(hasher.finalize())))
}
