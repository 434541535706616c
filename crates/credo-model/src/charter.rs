// charter.rs — The validated policy charter.
//
// A charter maps scope keys to categorized rule sequences. Order matters
// twice over: scope fragments keep document order (the loader checks the
// chain separately), and categories keep first-seen document order so that
// resolution and rendering are deterministic. Vec-backed on purpose — no
// hash-map iteration order can leak into output.

use crate::rule::PolicyRule;
use crate::scope::ScopeKey;

/// A complete, already-validated policy charter.
///
/// Built by the registry loader; by the time a `Charter` value exists,
/// scope keys parse, severities are known, and rule ids are unique within
/// each scope/category.
#[derive(Debug, Clone, PartialEq)]
pub struct Charter {
    /// Semantic version of the charter document.
    pub version: String,

    /// Scope fragments in document order.
    pub scopes: Vec<ScopeFragment>,
}

/// The rules one scope declares.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeFragment {
    pub key: ScopeKey,

    /// Categories in document order.
    pub categories: Vec<RuleCategory>,
}

/// An ordered rule sequence under one category name.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleCategory {
    pub name: String,
    pub rules: Vec<PolicyRule>,
}

impl Charter {
    /// The fragment for a concrete scope key, if the charter declares one.
    pub fn fragment(&self, key: &ScopeKey) -> Option<&ScopeFragment> {
        self.scopes.iter().find(|fragment| &fragment.key == key)
    }
}
