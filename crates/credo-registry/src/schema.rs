// schema.rs — Published schema documents and the external validator seam.
//
// The JSON-Schema documents generated here are the published contract for
// registry files. Full JSON-Schema *enforcement* is an external
// collaborator behind [`SchemaValidator`]; the loader's built-in structural
// checks always run regardless.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::Deserialize;
use thiserror::Error;

use credo_model::{BehaviorConfig, PolicyRule};

/// Which registry document kind a schema or validation call refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    Charter,
    Behavior,
}

impl std::fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaKind::Charter => write!(f, "charter"),
            SchemaKind::Behavior => write!(f, "behavior"),
        }
    }
}

/// A location-qualified schema violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("at {location}: {message}")]
pub struct SchemaViolation {
    /// Dotted path into the document (e.g. `scopes.global.security.0.severity`).
    pub location: String,
    pub message: String,
}

/// Boundary for JSON-Schema validation of registry documents.
///
/// Invoked synchronously before resolution when supplied to the loader.
/// Implementations live outside this repository.
pub trait SchemaValidator {
    fn validate(
        &self,
        document: &serde_yaml::Value,
        kind: SchemaKind,
    ) -> Result<(), SchemaViolation>;
}

/// Shape of `charter.yaml`, published as `charter.schema.json`.
///
/// The loader itself walks the raw YAML to preserve category document
/// order; this type exists to pin the published schema (and is what the
/// log-mining pipeline's rule suggestions conform to).
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CharterDoc {
    /// Semantic version of the charter.
    pub version: String,

    /// Rules keyed by scope key string, then by category name.
    pub scopes: BTreeMap<String, BTreeMap<String, Vec<PolicyRule>>>,
}

/// Shape of a `behavior/**.yaml` document, published as
/// `behavior.schema.json`.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct BehaviorDoc {
    /// Semantic version of the behavior document.
    pub version: String,

    /// The scope's behavior fragment.
    pub behavior: BehaviorConfig,
}

/// The published JSON Schema for `charter.yaml`.
pub fn charter_schema() -> schemars::Schema {
    schemars::schema_for!(CharterDoc)
}

/// The published JSON Schema for behavior documents.
pub fn behavior_schema() -> schemars::Schema {
    schemars::schema_for!(BehaviorDoc)
}
