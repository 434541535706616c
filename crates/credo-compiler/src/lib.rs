//! # credo-compiler
//!
//! The policy compilation core: resolves a charter across the scope
//! precedence chain, renders deterministic artifact bodies, and splices the
//! primary artifact's managed region without touching human-authored text.
//!
//! ## Pipeline
//!
//! ```text
//! registry files → resolve → render → inject → artifact files
//! ```
//!
//! Data flows one direction; nothing reads back what it produced.
//!
//! ## Key invariants
//!
//! - **Determinism**: the same (charter, chain) pair yields byte-identical
//!   artifacts. No timestamps, no environment-dependent text.
//! - **Idempotence**: injecting the same region twice is a fixed point.
//! - **Ownership**: only the text between the sentinel markers is ever
//!   replaced; everything outside is caller-owned.

pub mod apply;
pub mod error;
pub mod inject;
pub mod render;
pub mod resolve;

pub use apply::{apply, ApplyOptions, ArtifactOutcome, OutcomeStatus};
pub use error::CompileError;
pub use inject::{
    classify_markers, inject, inject_region, InjectAction, InjectOutcome, MarkerAnomaly,
    MarkerState, BEGIN_MARKER, END_MARKER,
};
pub use render::{render_artifacts, PRIMARY_ARTIFACT_PATH};
pub use resolve::resolve;
