//! Canonical JSON bytes for hashing and stable report output.
//!
//! Rules: object keys sorted by byte order, compact separators, integers
//! only, strings escaped the way `serde_json` escapes them.

use std::collections::BTreeMap;
use std::fmt::Write;

use serde_json::Value;

use super::hash::{canonical_hash, ContentHash, HashDomain};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonError {
    /// A JSON number was not an integer.
    NonIntegerNumber { path: String, raw: String },
}

impl std::fmt::Display for CanonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonIntegerNumber { path, raw } => {
                write!(f, "non-integer number at {path}: {raw}")
            }
        }
    }
}

impl std::error::Error for CanonError {}

/// Serialize `value` canonically.
///
/// # Errors
///
/// [`CanonError::NonIntegerNumber`] if any number is a float.
pub fn canonical_json_bytes(value: &Value) -> Result<Vec<u8>, CanonError> {
    let mut out = Vec::with_capacity(64);
    emit(&mut out, value, &mut String::from("$"))?;
    Ok(out)
}

/// Hash the canonical bytes of `value` under `domain`.
///
/// # Errors
///
/// Same as [`canonical_json_bytes`].
pub fn canonical_json_hash(domain: HashDomain, value: &Value) -> Result<ContentHash, CanonError> {
    let bytes = canonical_json_bytes(value)?;
    Ok(canonical_hash(domain, &bytes))
}

fn emit(out: &mut Vec<u8>, value: &Value, path: &mut String) -> Result<(), CanonError> {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => push_scalar(out, value),
        Value::Number(n) => {
            if n.is_f64() {
                return Err(CanonError::NonIntegerNumber {
                    path: path.clone(),
                    raw: n.to_string(),
                });
            }
            push_scalar(out, value);
        }
        Value::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                let mark = path.len();
                let _ = write!(path, "[{i}]");
                emit(out, item, path)?;
                path.truncate(mark);
            }
            out.push(b']');
        }
        Value::Object(map) => {
            let sorted: BTreeMap<&str, &Value> =
                map.iter().map(|(k, v)| (k.as_str(), v)).collect();
            out.push(b'{');
            for (i, (key, item)) in sorted.into_iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                push_scalar(out, &Value::String(key.to_string()));
                out.push(b':');
                let mark = path.len();
                path.push('.');
                path.push_str(key);
                emit(out, item, path)?;
                path.truncate(mark);
            }
            out.push(b'}');
        }
    }
    Ok(())
}

// Scalars have no key order, so serde_json's compact writer is already canonical.
fn push_scalar(out: &mut Vec<u8>, value: &Value) {
    let _ = serde_json::to_writer(&mut *out, value);
}
