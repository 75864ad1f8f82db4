//! Key-sorted JSON files and their content hashes.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use fuq_core::errors::{ErrorInfo, FuqError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

fn sorted(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, sorted(value)))
                .collect::<BTreeMap<_, _>>()
                .into_iter()
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(sorted).collect()),
        other => other,
    }
}

/// Pretty JSON with object keys sorted at every depth.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, FuqError> {
    let value = serde_json::to_value(value)
        .map_err(|err| FuqError::Serde(ErrorInfo::new("json-serialize", err.to_string())))?;
    serde_json::to_vec_pretty(&sorted(value))
        .map_err(|err| FuqError::Serde(ErrorInfo::new("json-write", err.to_string())))
}

/// SHA-256 of the canonical JSON form, hex encoded.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, FuqError> {
    let digest = Sha256::digest(to_canonical_json_bytes(value)?);
    Ok(format!("{digest:x}"))
}

/// Writes `value` as canonical JSON, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), FuqError> {
    let with_path =
        |info: ErrorInfo| FuqError::Serde(info.with_context("path", path.display().to_string()));
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| with_path(ErrorInfo::new("json-mkdir", err.to_string())))?;
    }
    let bytes = to_canonical_json_bytes(value).map_err(|err| with_path(err.info().clone()))?;
    fs::write(path, bytes).map_err(|err| with_path(ErrorInfo::new("json-write", err.to_string())))
}

/// Reads a JSON file written by [`write_json`].
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, FuqError> {
    let with_path =
        |info: ErrorInfo| FuqError::Serde(info.with_context("path", path.display().to_string()));
    let bytes =
        fs::read(path).map_err(|err| with_path(ErrorInfo::new("json-read", err.to_string())))?;
    serde_json::from_slice(&bytes)
        .map_err(|err| with_path(ErrorInfo::new("json-parse", err.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keys_are_sorted_recursively() {
        let value = json!({"b": {"z": 1, "a": 2}, "a": [ {"y": 0, "x": 1} ]});
        let bytes = to_canonical_json_bytes(&value).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let positions: Vec<usize> = ["\"a\": [", "\"x\"", "\"y\"", "\"b\"", "\"a\": 2", "\"z\""]
            .iter()
            .map(|key| text.find(key).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]), "{text}");
    }

    #[test]
    fn hash_ignores_key_order() {
        let left = stable_hash_string(&json!({"a": 1, "b": 2})).unwrap();
        let right = stable_hash_string(&json!({"b": 2, "a": 1})).unwrap();
        assert_eq!(left, right);
        assert_eq!(left.len(), 64);
    }
}
