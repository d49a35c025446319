use crate::error::GenerateError;
use crate::mapper::kind;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Reads the whole source export into memory and returns its descriptors.
pub fn load_descriptors(path: &Path) -> Result<Vec<Value>, GenerateError> {
    if path.as_os_str().is_empty() {
        return Err(GenerateError::SourceNotSet);
    }
    if !path.exists() {
        return Err(GenerateError::SourceMissing(path.to_path_buf()));
    }
    let raw = fs::read_to_string(path).map_err(|source| GenerateError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let descriptors = parse_descriptors(&raw)?;
    debug!(path = %path.display(), count = descriptors.len(), "loaded source descriptors");
    Ok(descriptors)
}

pub fn parse_descriptors(raw: &str) -> Result<Vec<Value>, GenerateError> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Array(descriptors) => Ok(descriptors),
        other => Err(GenerateError::NotAnArray(kind(&other))),
    }
}
