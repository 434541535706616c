//! # credo-registry
//!
//! Loads and validates the policy registry: `charter.yaml` plus one
//! behavior document per scope under `behavior/`.
//!
//! All pre-resolution validation lives here — scope-key strings, semver,
//! rule-id format, severity values, duplicate identifiers. A [`Charter`]
//! value that leaves this crate is fully validated; resolution downstream
//! cannot fail. Validation failures abort before anything downstream runs
//! (the all-or-nothing contract), with messages naming the offending file
//! and field.
//!
//! [`Charter`]: credo_model::Charter

pub mod error;
pub mod loader;
pub mod schema;

pub use error::RegistryError;
pub use loader::{Registry, RegistryBundle};
pub use schema::{behavior_schema, charter_schema, SchemaKind, SchemaValidator, SchemaViolation};
