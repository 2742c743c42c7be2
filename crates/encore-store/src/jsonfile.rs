//! Whole-file JSON persistence helpers shared by the stores.
//!
//! Every store round-trips its complete state through one small file
//! per concern. Guild counts and achievement lists are tiny, so the
//! simplicity beats incremental updates.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use encore_core::error::EncoreError;

/// Read and parse a JSON file, returning `default` when the file does
/// not exist yet. A file that exists but cannot be parsed is an error;
/// overwriting it would silently discard user data.
pub(crate) fn load_or<T: DeserializeOwned>(path: &Path, default: T) -> Result<T, EncoreError> {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content)
            .map_err(|e| EncoreError::Store(format!("corrupt store {}: {}", path.display(), e))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(default),
        Err(e) => Err(e.into()),
    }
}

/// Serialize a value as pretty JSON and write the whole file, creating
/// parent directories on first use.
pub(crate) fn save<T: Serialize>(path: &Path, value: &T) -> Result<(), EncoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    std::fs::write(path, out)?;
    Ok(())
}
