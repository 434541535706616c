// loader.rs — Reads and validates charter and behavior documents.
//
// The charter is walked as raw YAML rather than deserialized into a typed
// document so category order is the document order — resolution and
// rendering depend on first-seen ordering, which a sorted or hashed map
// would destroy.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use credo_model::{
    BehaviorConfig, Charter, PolicyRule, RuleCategory, ScopeChain, ScopeFragment, ScopeKey,
};

use crate::error::RegistryError;
use crate::schema::{BehaviorDoc, SchemaKind, SchemaValidator};

/// Charter file name inside the registry root.
pub const CHARTER_FILE: &str = "charter.yaml";

fn semver_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\d+\.\d+\.\d+(?:-[0-9A-Za-z.\-]+)?(?:\+[0-9A-Za-z.\-]+)?$").unwrap()
    })
}

fn rule_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Z]{2,6}-\d{3}$").unwrap())
}

/// A policy registry rooted at a directory.
///
/// ```text
/// <root>/charter.yaml
/// <root>/behavior/global.yaml
/// <root>/behavior/team/<name>.yaml     (one document per scope; optional)
/// ```
pub struct Registry {
    root: PathBuf,
    validator: Option<Box<dyn SchemaValidator>>,
}

/// Everything one compilation run loads from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryBundle {
    pub charter: Charter,
    /// Behavior fragments for the chain's scopes, ascending, skipping
    /// scopes with no behavior document.
    pub behaviors: Vec<(ScopeKey, BehaviorConfig)>,
}

impl Registry {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Registry {
            root: root.into(),
            validator: None,
        }
    }

    /// Attach an external JSON-Schema validator, invoked on every document
    /// before structural validation.
    pub fn with_validator(mut self, validator: Box<dyn SchemaValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load everything a compilation run needs: the charter plus the
    /// behavior documents for every scope in the chain that has one.
    pub fn load_for_chain(&self, chain: &ScopeChain) -> Result<RegistryBundle, RegistryError> {
        let charter = self.load_charter()?;
        let mut behaviors = Vec::new();
        for key in chain.iter() {
            if let Some(config) = self.load_behavior(key)? {
                behaviors.push((key.clone(), config));
            }
        }
        tracing::debug!(
            "registry loaded: {} scope fragment(s), {} behavior document(s)",
            charter.scopes.len(),
            behaviors.len()
        );
        Ok(RegistryBundle { charter, behaviors })
    }

    /// Load and validate `charter.yaml`.
    pub fn load_charter(&self) -> Result<Charter, RegistryError> {
        let path = self.root.join(CHARTER_FILE);
        let text = fs::read_to_string(&path).map_err(|source| RegistryError::Io {
            path: path.clone(),
            source,
        })?;
        let doc: serde_yaml::Value =
            serde_yaml::from_str(&text).map_err(|source| RegistryError::Parse {
                path: path.clone(),
                source,
            })?;

        if let Some(validator) = &self.validator {
            validator
                .validate(&doc, SchemaKind::Charter)
                .map_err(|source| RegistryError::Schema {
                    path: path.clone(),
                    source,
                })?;
        }

        let version = require_version(&doc, &path)?;
        let scopes_value = doc.get("scopes").ok_or_else(|| RegistryError::MissingField {
            path: path.clone(),
            field: "scopes".to_string(),
        })?;
        let scopes_mapping = scopes_value
            .as_mapping()
            .ok_or_else(|| RegistryError::NotAMapping {
                path: path.clone(),
                field: "scopes".to_string(),
            })?;

        let mut scopes = Vec::new();
        for (key_value, fragment_value) in scopes_mapping {
            let key_str = key_value.as_str().unwrap_or_default();
            let key: ScopeKey =
                key_str
                    .parse()
                    .map_err(|source| RegistryError::InvalidScopeKey {
                        path: path.clone(),
                        key: key_str.to_string(),
                        source,
                    })?;
            let categories = parse_categories(fragment_value, &key, &path)?;
            scopes.push(ScopeFragment { key, categories });
        }

        tracing::debug!("charter {}: {} scope fragment(s)", version, scopes.len());
        Ok(Charter { version, scopes })
    }

    /// Load the behavior document for one scope.
    ///
    /// Missing documents are not an error — a scope with no behavior
    /// fragment simply contributes nothing to the merge.
    pub fn load_behavior(
        &self,
        key: &ScopeKey,
    ) -> Result<Option<BehaviorConfig>, RegistryError> {
        let path = self.root.join(key.behavior_rel_path());
        if !path.exists() {
            tracing::debug!("no behavior document for scope '{}', skipping", key);
            return Ok(None);
        }
        let text = fs::read_to_string(&path).map_err(|source| RegistryError::Io {
            path: path.clone(),
            source,
        })?;

        if let Some(validator) = &self.validator {
            let doc: serde_yaml::Value =
                serde_yaml::from_str(&text).map_err(|source| RegistryError::Parse {
                    path: path.clone(),
                    source,
                })?;
            validator
                .validate(&doc, SchemaKind::Behavior)
                .map_err(|source| RegistryError::Schema {
                    path: path.clone(),
                    source,
                })?;
        }

        let doc: BehaviorDoc =
            serde_yaml::from_str(&text).map_err(|source| RegistryError::Parse {
                path: path.clone(),
                source,
            })?;
        if !semver_re().is_match(&doc.version) {
            return Err(RegistryError::InvalidVersion {
                path,
                version: doc.version,
            });
        }
        Ok(Some(doc.behavior))
    }
}

fn require_version(doc: &serde_yaml::Value, path: &Path) -> Result<String, RegistryError> {
    let version = doc
        .get("version")
        .and_then(|v| v.as_str())
        .ok_or_else(|| RegistryError::MissingField {
            path: path.to_path_buf(),
            field: "version".to_string(),
        })?;
    if !semver_re().is_match(version) {
        return Err(RegistryError::InvalidVersion {
            path: path.to_path_buf(),
            version: version.to_string(),
        });
    }
    Ok(version.to_string())
}

/// Parse one scope fragment's categories, preserving document order and
/// rejecting duplicate rule ids within the scope.
fn parse_categories(
    fragment: &serde_yaml::Value,
    scope: &ScopeKey,
    path: &Path,
) -> Result<Vec<RuleCategory>, RegistryError> {
    if fragment.is_null() {
        return Ok(Vec::new());
    }
    let mapping = fragment
        .as_mapping()
        .ok_or_else(|| RegistryError::NotAMapping {
            path: path.to_path_buf(),
            field: format!("scopes.{}", scope),
        })?;

    // id → category of first declaration, for duplicate reporting.
    let mut seen: HashMap<String, String> = HashMap::new();
    let mut categories = Vec::new();

    for (name_value, rules_value) in mapping {
        let name = name_value
            .as_str()
            .ok_or_else(|| RegistryError::NotAMapping {
                path: path.to_path_buf(),
                field: format!("scopes.{}", scope),
            })?
            .to_string();

        let mut rules = Vec::new();
        if !rules_value.is_null() {
            let sequence =
                rules_value
                    .as_sequence()
                    .ok_or_else(|| RegistryError::NotAMapping {
                        path: path.to_path_buf(),
                        field: format!("scopes.{}.{}", scope, name),
                    })?;
            for (index, rule_value) in sequence.iter().enumerate() {
                let rule: PolicyRule = serde_yaml::from_value(rule_value.clone()).map_err(
                    |source| RegistryError::InvalidRule {
                        path: path.to_path_buf(),
                        scope: scope.to_string(),
                        category: name.clone(),
                        index,
                        message: source.to_string(),
                    },
                )?;
                if !rule_id_re().is_match(&rule.id) {
                    return Err(RegistryError::InvalidRuleId {
                        path: path.to_path_buf(),
                        scope: scope.to_string(),
                        category: name.clone(),
                        id: rule.id,
                    });
                }
                if let Some(first_category) = seen.get(&rule.id) {
                    return Err(RegistryError::DuplicateRuleId {
                        path: path.to_path_buf(),
                        scope: scope.to_string(),
                        id: rule.id,
                        first_category: first_category.clone(),
                        second_category: name.clone(),
                    });
                }
                seen.insert(rule.id.clone(), name.clone());
                rules.push(rule);
            }
        }
        categories.push(RuleCategory { name, rules });
    }

    Ok(categories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaViolation;

    const CHARTER: &str = r#"
version: 1.2.0
scopes:
  global:
    security:
      - id: SEC-001
        rule: "Never commit credentials"
        severity: critical
        tags: ["security"]
    code_quality:
      - id: QUAL-001
        rule: "Propagate errors explicitly"
        severity: warning
  team:backend:
    security:
      - id: SEC-001
        rule: "Never commit credentials, including in fixtures"
        severity: critical
        tags: ["security"]
"#;

    fn registry_with_charter(charter: &str) -> (tempfile::TempDir, Registry) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CHARTER_FILE), charter).unwrap();
        let registry = Registry::new(dir.path());
        (dir, registry)
    }

    #[test]
    fn load_valid_charter() {
        let (_dir, registry) = registry_with_charter(CHARTER);
        let charter = registry.load_charter().unwrap();
        assert_eq!(charter.version, "1.2.0");
        assert_eq!(charter.scopes.len(), 2);
        assert_eq!(charter.scopes[0].key, ScopeKey::Global);
        assert_eq!(
            charter.scopes[1].key,
            ScopeKey::Team("backend".to_string())
        );
    }

    #[test]
    fn categories_keep_document_order() {
        let (_dir, registry) = registry_with_charter(CHARTER);
        let charter = registry.load_charter().unwrap();
        let names: Vec<&str> = charter.scopes[0]
            .categories
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["security", "code_quality"]);
    }

    #[test]
    fn missing_charter_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let registry = Registry::new(dir.path());
        assert!(matches!(
            registry.load_charter(),
            Err(RegistryError::Io { .. })
        ));
    }

    #[test]
    fn missing_version_is_reported() {
        let (_dir, registry) = registry_with_charter("scopes:\n  global:\n");
        let err = registry.load_charter().unwrap_err();
        assert!(err.to_string().contains("version"));
    }

    #[test]
    fn non_semver_version_rejected() {
        let (_dir, registry) = registry_with_charter("version: v1\nscopes: {}\n");
        assert!(matches!(
            registry.load_charter(),
            Err(RegistryError::InvalidVersion { .. })
        ));
    }

    #[test]
    fn unknown_scope_key_rejected() {
        let charter = "version: 1.0.0\nscopes:\n  department:sales:\n    security: []\n";
        let (_dir, registry) = registry_with_charter(charter);
        let err = registry.load_charter().unwrap_err();
        assert!(matches!(err, RegistryError::InvalidScopeKey { .. }));
        assert!(err.to_string().contains("department"));
    }

    #[test]
    fn malformed_severity_names_file_and_field() {
        let charter = r#"
version: 1.0.0
scopes:
  global:
    security:
      - id: SEC-001
        rule: "text"
        severity: blocker
"#;
        let (_dir, registry) = registry_with_charter(charter);
        let err = registry.load_charter().unwrap_err();
        let text = err.to_string();
        assert!(matches!(err, RegistryError::InvalidRule { .. }));
        assert!(text.contains("global"));
        assert!(text.contains("security"));
    }

    #[test]
    fn rule_id_format_enforced() {
        let charter = r#"
version: 1.0.0
scopes:
  global:
    security:
      - id: sec1
        rule: "text"
        severity: critical
"#;
        let (_dir, registry) = registry_with_charter(charter);
        assert!(matches!(
            registry.load_charter(),
            Err(RegistryError::InvalidRuleId { .. })
        ));
    }

    #[test]
    fn duplicate_id_within_scope_rejected() {
        let charter = r#"
version: 1.0.0
scopes:
  global:
    security:
      - id: SEC-001
        rule: "first"
        severity: critical
    docs:
      - id: SEC-001
        rule: "second"
        severity: info
"#;
        let (_dir, registry) = registry_with_charter(charter);
        let err = registry.load_charter().unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateRuleId { .. }));
        let text = err.to_string();
        assert!(text.contains("SEC-001"));
        assert!(text.contains("security"));
        assert!(text.contains("docs"));
    }

    #[test]
    fn same_id_across_scopes_is_allowed() {
        // CHARTER re-declares SEC-001 at team:backend — that is the whole
        // point of precedence, not a duplicate.
        let (_dir, registry) = registry_with_charter(CHARTER);
        assert!(registry.load_charter().is_ok());
    }

    #[test]
    fn empty_scope_fragment_is_allowed() {
        let charter = "version: 1.0.0\nscopes:\n  global:\n  session:\n";
        let (_dir, registry) = registry_with_charter(charter);
        let parsed = registry.load_charter().unwrap();
        assert_eq!(parsed.scopes.len(), 2);
        assert!(parsed.scopes[0].categories.is_empty());
    }

    #[test]
    fn load_behavior_missing_returns_none() {
        let (_dir, registry) = registry_with_charter(CHARTER);
        let result = registry.load_behavior(&ScopeKey::Global).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn load_behavior_document() {
        let (dir, registry) = registry_with_charter(CHARTER);
        let behavior_dir = dir.path().join("behavior");
        fs::create_dir_all(&behavior_dir).unwrap();
        fs::write(
            behavior_dir.join("global.yaml"),
            "version: 1.0.0\nbehavior:\n  role: \"Engineer\"\n",
        )
        .unwrap();

        let config = registry.load_behavior(&ScopeKey::Global).unwrap().unwrap();
        assert_eq!(config.role.as_deref(), Some("Engineer"));
    }

    #[test]
    fn behavior_version_validated() {
        let (dir, registry) = registry_with_charter(CHARTER);
        let behavior_dir = dir.path().join("behavior");
        fs::create_dir_all(&behavior_dir).unwrap();
        fs::write(
            behavior_dir.join("global.yaml"),
            "version: latest\nbehavior: {}\n",
        )
        .unwrap();
        assert!(matches!(
            registry.load_behavior(&ScopeKey::Global),
            Err(RegistryError::InvalidVersion { .. })
        ));
    }

    #[test]
    fn load_for_chain_collects_present_behaviors() {
        let (dir, registry) = registry_with_charter(CHARTER);
        let team_dir = dir.path().join("behavior").join("team");
        fs::create_dir_all(&team_dir).unwrap();
        fs::write(
            team_dir.join("backend.yaml"),
            "version: 1.0.0\nbehavior:\n  role: \"Backend Engineer\"\n",
        )
        .unwrap();

        let chain = ScopeChain::new(vec![
            ScopeKey::Global,
            ScopeKey::Team("backend".to_string()),
        ])
        .unwrap();
        let bundle = registry.load_for_chain(&chain).unwrap();
        // Only team:backend has a behavior document.
        assert_eq!(bundle.behaviors.len(), 1);
        assert_eq!(
            bundle.behaviors[0].0,
            ScopeKey::Team("backend".to_string())
        );
    }

    struct RejectEverything;

    impl SchemaValidator for RejectEverything {
        fn validate(
            &self,
            _document: &serde_yaml::Value,
            _kind: SchemaKind,
        ) -> Result<(), SchemaViolation> {
            Err(SchemaViolation {
                location: "$".to_string(),
                message: "rejected by external validator".to_string(),
            })
        }
    }

    #[test]
    fn external_validator_runs_before_structural_checks() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CHARTER_FILE), CHARTER).unwrap();
        let registry = Registry::new(dir.path()).with_validator(Box::new(RejectEverything));
        let err = registry.load_charter().unwrap_err();
        assert!(matches!(err, RegistryError::Schema { .. }));
        assert!(err.to_string().contains("rejected by external validator"));
    }
}
