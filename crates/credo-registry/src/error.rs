// error.rs — Error types for registry loading and validation.

use std::path::PathBuf;

use thiserror::Error;

use crate::schema::SchemaViolation;

/// Errors from loading or validating the policy registry.
///
/// All of these are fatal to a compilation run and occur before any
/// artifact is written.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path} as YAML: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("{path}: missing required field '{field}'")]
    MissingField { path: PathBuf, field: String },

    #[error("{path}: field '{field}' must be a mapping")]
    NotAMapping { path: PathBuf, field: String },

    #[error("{path}: '{version}' is not a semantic version")]
    InvalidVersion { path: PathBuf, version: String },

    #[error("{path}: invalid scope key '{key}': {source}")]
    InvalidScopeKey {
        path: PathBuf,
        key: String,
        source: credo_model::ScopeError,
    },

    #[error("{path}: scope '{scope}' category '{category}' rule {index}: {message}")]
    InvalidRule {
        path: PathBuf,
        scope: String,
        category: String,
        index: usize,
        message: String,
    },

    #[error("{path}: scope '{scope}' category '{category}': rule id '{id}' does not match PREFIX-NNN (e.g. SEC-001)")]
    InvalidRuleId {
        path: PathBuf,
        scope: String,
        category: String,
        id: String,
    },

    #[error("{path}: scope '{scope}': duplicate rule id '{id}' (categories '{first_category}' and '{second_category}')")]
    DuplicateRuleId {
        path: PathBuf,
        scope: String,
        id: String,
        first_category: String,
        second_category: String,
    },

    #[error("{path}: schema validation failed: {source}")]
    Schema {
        path: PathBuf,
        source: SchemaViolation,
    },
}
