//! Recursive deep-merge over untyped YAML documents.
//!
//! The merge is independent of file I/O so it can be exercised on plain
//! values. Precedence rules:
//!
//! - scalars overwrite, including empty values (empty string, zero, false,
//!   null) — later documents intentionally blank out earlier ones;
//! - mappings merge recursively, key by key;
//! - sequences are replaced wholesale, never merged element-wise;
//! - a mapping colliding with a non-mapping at the same key is an error.

use serde_yaml::{Mapping, Value};
use thiserror::Error;

/// Shape collision between an existing and an incoming value.
#[derive(Debug, Error)]
#[error("incompatible value shapes at `{key_path}`: {existing} vs {incoming}")]
pub struct MergeError {
    key_path: String,
    existing: &'static str,
    incoming: &'static str,
}

impl MergeError {
    /// Dotted path of the offending key, e.g. `redis.port`.
    pub fn key_path(&self) -> &str {
        &self.key_path
    }
}

/// Deep-merges `overlay` into `base`, `overlay` taking precedence.
pub fn deep_merge(base: &mut Mapping, overlay: &Mapping) -> Result<(), MergeError> {
    merge_mapping(base, overlay, "")
}

fn merge_mapping(base: &mut Mapping, overlay: &Mapping, path: &str) -> Result<(), MergeError> {
    for (key, incoming) in overlay {
        let key_path = join_path(path, key);
        match base.get_mut(key) {
            Some(existing) => merge_value(existing, incoming, &key_path)?,
            None => {
                base.insert(key.clone(), incoming.clone());
            }
        }
    }
    Ok(())
}

fn merge_value(existing: &mut Value, incoming: &Value, key_path: &str) -> Result<(), MergeError> {
    if let Value::Mapping(incoming_map) = incoming {
        return match existing {
            Value::Mapping(existing_map) => merge_mapping(existing_map, incoming_map, key_path),
            other => Err(mismatch(key_path, other, incoming)),
        };
    }

    if matches!(existing, Value::Mapping(_)) {
        return Err(mismatch(key_path, existing, incoming));
    }

    // Scalars and sequences overwrite wholesale, empty values included.
    *existing = incoming.clone();
    Ok(())
}

fn mismatch(key_path: &str, existing: &Value, incoming: &Value) -> MergeError {
    MergeError {
        key_path: key_path.to_string(),
        existing: value_kind(existing),
        incoming: value_kind(incoming),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged",
    }
}

fn join_path(path: &str, key: &Value) -> String {
    let label = match key {
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| format!("{other:?}")),
    };
    if path.is_empty() {
        label
    } else {
        format!("{path}.{label}")
    }
}
