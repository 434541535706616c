// behavior.rs — Per-scope AI behavior configuration and its merge rules.
//
// Merging is explicit per field kind, never reflective:
// - scalar fields: present-overwrites-absent;
// - object fields (tone, the defaults map, each named persona): merge
//   key-by-key one level deep;
// - list fields: overwrite wholesale — lists are atomic.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Behavior settings declared at one scope.
///
/// All fields are optional: a fragment only states what it wants to change
/// relative to lower-precedence scopes. The effective configuration is the
/// fold of every fragment in the chain, ascending.
///
/// ```yaml
/// role: "Senior Software Engineer"
/// tone:
///   voice: "professional, precise"
///   verbosity: "balanced"
///   formatting: ["code-with-comments", "bullet-lists-for-steps"]
/// defaults:
///   code_style: "Follow established project conventions"
/// personas:
///   reviewer:
///     focus: "thorough analysis"
///     verbosity: "detailed"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BehaviorConfig {
    /// Primary role identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Communication style. Merges field-wise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<ToneConfig>,

    /// Default behavioral conventions, keyed by convention name.
    /// Merges key-wise.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub defaults: BTreeMap<String, String>,

    /// Review criteria checklist. Overwrites wholesale when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer_checklist: Option<Vec<String>>,

    /// Scenarios requiring user confirmation. Overwrites wholesale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ask_when_unsure: Option<Vec<String>>,

    /// Named persona definitions. Merges key-by-key; a persona present at
    /// two scopes merges field-wise, one level deep.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub personas: BTreeMap<String, Persona>,
}

/// Voice and verbosity settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToneConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbosity: Option<String>,

    /// Formatting preferences. A list — overwrites wholesale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatting: Option<Vec<String>>,
}

/// A named operating persona (e.g. `reviewer`, `implementer`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Persona {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbosity: Option<String>,
}

impl BehaviorConfig {
    /// Merge a higher-precedence fragment into `self`.
    pub fn merge_from(&mut self, overlay: &BehaviorConfig) {
        if let Some(role) = &overlay.role {
            self.role = Some(role.clone());
        }

        match (&mut self.tone, &overlay.tone) {
            (Some(base), Some(over)) => base.merge_from(over),
            (None, Some(over)) => self.tone = Some(over.clone()),
            _ => {}
        }

        for (key, value) in &overlay.defaults {
            self.defaults.insert(key.clone(), value.clone());
        }

        if let Some(list) = &overlay.reviewer_checklist {
            self.reviewer_checklist = Some(list.clone());
        }
        if let Some(list) = &overlay.ask_when_unsure {
            self.ask_when_unsure = Some(list.clone());
        }

        for (name, persona) in &overlay.personas {
            match self.personas.get_mut(name) {
                Some(base) => base.merge_from(persona),
                None => {
                    self.personas.insert(name.clone(), persona.clone());
                }
            }
        }
    }
}

impl ToneConfig {
    fn merge_from(&mut self, overlay: &ToneConfig) {
        if let Some(voice) = &overlay.voice {
            self.voice = Some(voice.clone());
        }
        if let Some(verbosity) = &overlay.verbosity {
            self.verbosity = Some(verbosity.clone());
        }
        if let Some(formatting) = &overlay.formatting {
            self.formatting = Some(formatting.clone());
        }
    }
}

impl Persona {
    fn merge_from(&mut self, overlay: &Persona) {
        if let Some(focus) = &overlay.focus {
            self.focus = Some(focus.clone());
        }
        if let Some(verbosity) = &overlay.verbosity {
            self.verbosity = Some(verbosity.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global_config() -> BehaviorConfig {
        serde_yaml::from_str(
            r#"
role: "Senior Software Engineer"
tone:
  voice: "professional"
  verbosity: "balanced"
  formatting: ["code-with-comments"]
defaults:
  code_style: "project conventions"
  testing: "unit tests"
reviewer_checklist:
  - "Patterns followed"
  - "Errors handled"
personas:
  reviewer:
    focus: "analysis"
    verbosity: "detailed"
  implementer:
    focus: "clean implementation"
"#,
        )
        .unwrap()
    }

    #[test]
    fn scalar_overwrites_when_present() {
        let mut base = global_config();
        let overlay: BehaviorConfig =
            serde_yaml::from_str("role: \"Staff Engineer\"").unwrap();
        base.merge_from(&overlay);
        assert_eq!(base.role.as_deref(), Some("Staff Engineer"));
    }

    #[test]
    fn absent_field_inherits_lower_scope() {
        // tone.voice set globally, team fragment has no tone at all.
        let mut base = global_config();
        let overlay = BehaviorConfig::default();
        base.merge_from(&overlay);
        assert_eq!(base.tone.as_ref().unwrap().voice.as_deref(), Some("professional"));
    }

    #[test]
    fn tone_merges_field_wise() {
        let mut base = global_config();
        let overlay: BehaviorConfig = serde_yaml::from_str(
            r#"
tone:
  verbosity: "concise"
"#,
        )
        .unwrap();
        base.merge_from(&overlay);
        let tone = base.tone.unwrap();
        // Overridden field takes the overlay, untouched fields survive.
        assert_eq!(tone.verbosity.as_deref(), Some("concise"));
        assert_eq!(tone.voice.as_deref(), Some("professional"));
        assert_eq!(tone.formatting.unwrap(), vec!["code-with-comments"]);
    }

    #[test]
    fn persona_partial_override() {
        let mut base = global_config();
        let overlay: BehaviorConfig = serde_yaml::from_str(
            r#"
personas:
  reviewer:
    verbosity: "concise"
"#,
        )
        .unwrap();
        base.merge_from(&overlay);

        let reviewer = &base.personas["reviewer"];
        assert_eq!(reviewer.focus.as_deref(), Some("analysis"));
        assert_eq!(reviewer.verbosity.as_deref(), Some("concise"));
        // Personas only present at the lower scope survive.
        assert!(base.personas.contains_key("implementer"));
    }

    #[test]
    fn new_persona_added_by_overlay() {
        let mut base = global_config();
        let overlay: BehaviorConfig = serde_yaml::from_str(
            r#"
personas:
  security:
    focus: "threat modeling"
"#,
        )
        .unwrap();
        base.merge_from(&overlay);
        assert_eq!(base.personas.len(), 3);
        assert_eq!(
            base.personas["security"].focus.as_deref(),
            Some("threat modeling")
        );
    }

    #[test]
    fn lists_overwrite_wholesale() {
        let mut base = global_config();
        let overlay: BehaviorConfig = serde_yaml::from_str(
            r#"
reviewer_checklist:
  - "Only this item"
tone:
  formatting: ["tables"]
"#,
        )
        .unwrap();
        base.merge_from(&overlay);
        assert_eq!(base.reviewer_checklist.unwrap(), vec!["Only this item"]);
        assert_eq!(base.tone.unwrap().formatting.unwrap(), vec!["tables"]);
    }

    #[test]
    fn defaults_map_merges_key_wise() {
        let mut base = global_config();
        let overlay: BehaviorConfig = serde_yaml::from_str(
            r#"
defaults:
  testing: "property tests"
  docs: "concise"
"#,
        )
        .unwrap();
        base.merge_from(&overlay);
        assert_eq!(base.defaults["code_style"], "project conventions");
        assert_eq!(base.defaults["testing"], "property tests");
        assert_eq!(base.defaults["docs"], "concise");
    }

    #[test]
    fn fold_from_empty_accumulator() {
        // Resolution starts from an empty structure and folds each scope in.
        let mut acc = BehaviorConfig::default();
        acc.merge_from(&global_config());
        let overlay: BehaviorConfig =
            serde_yaml::from_str("tone:\n  verbosity: \"concise\"").unwrap();
        acc.merge_from(&overlay);
        assert_eq!(acc.role.as_deref(), Some("Senior Software Engineer"));
        assert_eq!(acc.tone.unwrap().verbosity.as_deref(), Some("concise"));
    }
}
