// rule.rs — Policy rules and severity levels.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Enforcement severity of a policy rule.
///
/// The renderer emits severities as three fixed sections in this order:
/// critical, then warning, then info.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Must follow — violations block.
    Critical,
    /// Should follow — violations are flagged.
    Warning,
    /// Recommended practice.
    Info,
}

impl Severity {
    /// All severities in display order.
    pub const ALL: [Severity; 3] = [Severity::Critical, Severity::Warning, Severity::Info];
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Critical => write!(f, "critical"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A single policy rule.
///
/// The `id` is unique within a category at any one scope. Across scopes the
/// same id may recur: the highest-precedence declaration replaces the rule
/// wholesale (there is no field-level merging of rules).
///
/// ```yaml
/// id: SEC-001
/// rule: "Never commit credentials or API keys"
/// severity: critical
/// tags: ["security", "credentials"]
/// rationale: "Leaked keys are the most common incident root cause."
/// example_violation: "api_key = \"sk-123456\""
/// example_fix: "api_key = std::env::var(\"API_KEY\")?"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PolicyRule {
    /// Stable identifier, `PREFIX-NNN` (e.g. `SEC-001`).
    pub id: String,

    /// Human-readable rule text.
    pub rule: String,

    /// Enforcement severity.
    pub severity: Severity,

    /// Categorization tags. The tag `security` marks a rule for the
    /// cross-cutting security section.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Why the rule exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,

    /// Example of code that violates the rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_violation: Option<String>,

    /// Example of a correct implementation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_fix: Option<String>,
}

impl PolicyRule {
    /// Whether this rule belongs in the cross-cutting security view.
    pub fn is_security(&self) -> bool {
        self.tags.iter().any(|t| t == "security")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(id: &str, severity: Severity, tags: &[&str]) -> PolicyRule {
        PolicyRule {
            id: id.to_string(),
            rule: format!("rule text for {}", id),
            severity,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            rationale: None,
            example_violation: None,
            example_fix: None,
        }
    }

    #[test]
    fn severity_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::Critical).unwrap(), "\"critical\"");
        let s: Severity = serde_json::from_str("\"warning\"").unwrap();
        assert_eq!(s, Severity::Warning);
    }

    #[test]
    fn severity_rejects_unknown_value() {
        let result: Result<Severity, _> = serde_json::from_str("\"fatal\"");
        assert!(result.is_err());
    }

    #[test]
    fn severity_display() {
        assert_eq!(Severity::Critical.to_string(), "critical");
        assert_eq!(Severity::Info.to_string(), "info");
    }

    #[test]
    fn rule_yaml_round_trip() {
        let yaml = r#"
id: SEC-001
rule: "Never commit credentials"
severity: critical
tags: ["security", "credentials"]
rationale: "Leaked keys"
"#;
        let parsed: PolicyRule = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed.id, "SEC-001");
        assert_eq!(parsed.severity, Severity::Critical);
        assert!(parsed.is_security());
        assert_eq!(parsed.rationale.as_deref(), Some("Leaked keys"));
        assert!(parsed.example_fix.is_none());
    }

    #[test]
    fn tags_default_to_empty() {
        let yaml = "id: QUAL-001\nrule: text\nseverity: warning\n";
        let parsed: PolicyRule = serde_yaml::from_str(yaml).unwrap();
        assert!(parsed.tags.is_empty());
        assert!(!parsed.is_security());
    }

    #[test]
    fn security_detection_is_exact_tag_match() {
        let r = rule("DOC-001", Severity::Info, &["security-adjacent"]);
        assert!(!r.is_security());
        let r = rule("SEC-002", Severity::Warning, &["docs", "security"]);
        assert!(r.is_security());
    }
}
