// context.rs — The resolved effective configuration.

use crate::behavior::BehaviorConfig;
use crate::rule::{PolicyRule, Severity};
use crate::scope::ScopeKey;

/// The single effective configuration for a target scope.
///
/// Produced by the resolver, consumed by the renderer; constructed fresh
/// per compilation run, never persisted, immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedContext {
    /// Version of the charter this context was resolved from.
    pub charter_version: String,

    /// The scope the resolution targeted.
    pub target: ScopeKey,

    /// Categories in first-seen order; within each, rules in display order.
    pub categories: Vec<ResolvedCategory>,

    /// The effective behavior configuration.
    pub behavior: BehaviorConfig,
}

/// One category's effective rules, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCategory {
    pub name: String,
    pub rules: Vec<PolicyRule>,
}

impl ResolvedContext {
    /// Rules of one severity, walking categories in first-seen order and
    /// rules in display order, paired with their category name.
    pub fn rules_with_severity(
        &self,
        severity: Severity,
    ) -> impl Iterator<Item = (&str, &PolicyRule)> {
        self.categories.iter().flat_map(move |category| {
            category
                .rules
                .iter()
                .filter(move |rule| rule.severity == severity)
                .map(move |rule| (category.name.as_str(), rule))
        })
    }

    /// Security-tagged rules in the same relative order as the severity
    /// sections (the cross-cutting view duplicates, it never removes).
    pub fn security_rules(&self) -> impl Iterator<Item = (&str, &PolicyRule)> {
        self.categories.iter().flat_map(|category| {
            category
                .rules
                .iter()
                .filter(|rule| rule.is_security())
                .map(move |rule| (category.name.as_str(), rule))
        })
    }

    /// Total rule count across all categories.
    pub fn rule_count(&self) -> usize {
        self.categories.iter().map(|c| c.rules.len()).sum()
    }

    /// Rule count for one severity.
    pub fn severity_count(&self, severity: Severity) -> usize {
        self.rules_with_severity(severity).count()
    }

    /// Category names in first-seen order.
    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(id: &str, severity: Severity, tags: &[&str]) -> PolicyRule {
        PolicyRule {
            id: id.to_string(),
            rule: format!("text {}", id),
            severity,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            rationale: None,
            example_violation: None,
            example_fix: None,
        }
    }

    fn context() -> ResolvedContext {
        ResolvedContext {
            charter_version: "1.0.0".to_string(),
            target: ScopeKey::Global,
            categories: vec![
                ResolvedCategory {
                    name: "security".to_string(),
                    rules: vec![
                        rule("SEC-001", Severity::Critical, &["security"]),
                        rule("SEC-002", Severity::Warning, &["security"]),
                    ],
                },
                ResolvedCategory {
                    name: "docs".to_string(),
                    rules: vec![rule("DOC-001", Severity::Info, &["docs"])],
                },
            ],
            behavior: BehaviorConfig::default(),
        }
    }

    #[test]
    fn severity_iteration_preserves_category_order() {
        let ctx = context();
        let warnings: Vec<&str> = ctx
            .rules_with_severity(Severity::Warning)
            .map(|(_, r)| r.id.as_str())
            .collect();
        assert_eq!(warnings, vec!["SEC-002"]);

        let infos: Vec<(&str, &str)> = ctx
            .rules_with_severity(Severity::Info)
            .map(|(cat, r)| (cat, r.id.as_str()))
            .collect();
        assert_eq!(infos, vec![("docs", "DOC-001")]);
    }

    #[test]
    fn security_view_duplicates_across_severities() {
        let ctx = context();
        let security: Vec<&str> = ctx.security_rules().map(|(_, r)| r.id.as_str()).collect();
        assert_eq!(security, vec!["SEC-001", "SEC-002"]);
        // The rules still appear in their severity sections too.
        assert_eq!(ctx.severity_count(Severity::Critical), 1);
        assert_eq!(ctx.severity_count(Severity::Warning), 1);
    }

    #[test]
    fn counts() {
        let ctx = context();
        assert_eq!(ctx.rule_count(), 3);
        assert_eq!(ctx.severity_count(Severity::Info), 1);
        assert_eq!(ctx.category_names(), vec!["security", "docs"]);
    }
}
