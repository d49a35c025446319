//! Error types for catalog generation.

use std::error::Error as StdError;
use std::path::PathBuf;
use thiserror::Error;

/// Joins an error and its causes into one line, outermost first.
pub fn chain(err: &dyn StdError) -> String {
    let mut text = err.to_string();
    let mut cause = err.source();
    while let Some(inner) = cause {
        text.push_str(": ");
        text.push_str(&inner.to_string());
        cause = inner.source();
    }
    text
}

/// A descriptor lacks structure one of the field rules relies on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field `{field}`: {reason}")]
pub struct MappingError {
    pub field: &'static str,
    pub reason: String,
}

impl MappingError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Failures that abort a run before anything is persisted.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("source file has to be set - no source data to process")]
    SourceNotSet,
    #[error("source file {} does not exist", .0.display())]
    SourceMissing(PathBuf),
    #[error("cannot read source file {}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("source is not valid JSON")]
    MalformedSource(#[from] serde_json::Error),
    #[error("source must be a JSON array of dataset descriptors, found {0}")]
    NotAnArray(&'static str),
    #[error("descriptor #{index} is malformed")]
    MalformedRecord {
        index: usize,
        #[source]
        source: MappingError,
    },
}

/// Per-record persistence failures. None of these stop the rest of a batch.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("record has no identifier, it cannot be named")]
    MissingIdentifier,
    #[error("{} already exists", .0.display())]
    AlreadyExists(PathBuf),
    #[error("destination {} is not usable", .path.display())]
    Destination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot serialize record")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML config")]
    Toml(#[from] toml::de::Error),
    #[error("invalid YAML config")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported config format {0:?}, expected .toml, .yaml or .yml")]
    UnsupportedFormat(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown operation: {0}")]
pub struct UnknownOperation(pub String);
