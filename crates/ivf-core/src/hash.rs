//! Canonical JSON encoding and stable content hashes.

use std::collections::BTreeMap;
use std::iter::FromIterator;

use serde::Serialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::errors::{ErrorInfo, IvfError};

fn serde_error(code: &str, err: impl ToString) -> IvfError {
    IvfError::Serde(ErrorInfo::new(code, err.to_string()))
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut ordered = BTreeMap::new();
            for (key, val) in map {
                ordered.insert(key, canonicalize(val));
            }
            Value::Object(Map::from_iter(ordered))
        }
        Value::Array(values) => Value::Array(values.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// Serializes a value into canonical JSON bytes with deterministic key ordering.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, IvfError> {
    let value = serde_json::to_value(value).map_err(|err| serde_error("json-encode", err))?;
    let canonical = canonicalize(value);
    let mut bytes = Vec::new();
    serde_json::to_writer(&mut bytes, &canonical).map_err(|err| serde_error("json-write", err))?;
    Ok(bytes)
}

/// Computes a stable hexadecimal SHA-256 digest of the canonical JSON form.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, IvfError> {
    let bytes = to_canonical_json_bytes(value)?;
    let digest = Sha256::digest(bytes);
    Ok(format!("{:x}", digest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Unordered {
        zeta: u8,
        alpha: u8,
    }

    #[test]
    fn canonical_bytes_sort_keys() {
        let bytes = to_canonical_json_bytes(&Unordered { zeta: 1, alpha: 2 }).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), r#"{"alpha":2,"zeta":1}"#);
    }

    #[test]
    fn hash_is_stable_and_sensitive() {
        let a = stable_hash_string(&vec![1u8, 2, 3]).unwrap();
        let b = stable_hash_string(&vec![1u8, 2, 3]).unwrap();
        let c = stable_hash_string(&vec![3u8, 2, 1]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }
}
