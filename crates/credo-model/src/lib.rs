//! # credo-model
//!
//! Value types for the Credo policy compiler.
//!
//! Everything here is an immutable value: rules, scope keys, the charter,
//! behavior configuration, and the [`ResolvedContext`] that resolution
//! produces. No I/O, no global state — the precedence chain is an explicit
//! [`ScopeChain`] value constructed per compilation run.
//!
//! ## Key invariants
//!
//! - **Replace, never merge, for rules**: a rule id re-declared at a
//!   higher-precedence scope replaces the lower declaration in its entirety.
//! - **Field-wise merge for behavior**: scalars overwrite, objects merge
//!   key-by-key one level deep, lists overwrite wholesale.
//! - **Deterministic ordering**: charter categories keep document order;
//!   resolution keeps first-seen display order.

pub mod artifact;
pub mod behavior;
pub mod charter;
pub mod context;
pub mod rule;
pub mod scope;

pub use artifact::{Artifact, ManagedRegion};
pub use behavior::{BehaviorConfig, Persona, ToneConfig};
pub use charter::{Charter, RuleCategory, ScopeFragment};
pub use context::{ResolvedCategory, ResolvedContext};
pub use rule::{PolicyRule, Severity};
pub use scope::{ScopeChain, ScopeError, ScopeKey};
