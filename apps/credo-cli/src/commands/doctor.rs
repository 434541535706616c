// doctor.rs — `credo doctor`: show the effective resolved configuration.

use std::path::Path;

use credo_compiler::resolve;
use credo_model::Severity;
use credo_registry::Registry;

use super::parse_chain;

pub fn execute(registry_root: &Path, scopes: &[String], format: &str) -> anyhow::Result<()> {
    let chain = parse_chain(scopes)?;
    let registry = Registry::new(registry_root);
    let bundle = registry.load_for_chain(&chain)?;
    let context = resolve(&bundle.charter, &bundle.behaviors, &chain);

    if format == "json" {
        let summary = serde_json::json!({
            "charter_version": context.charter_version,
            "target_scope": context.target.to_string(),
            "categories": context.category_names(),
            "rule_counts": {
                "critical": context.severity_count(Severity::Critical),
                "warning": context.severity_count(Severity::Warning),
                "info": context.severity_count(Severity::Info),
            },
            "behavior": &context.behavior,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Charter {} resolved for scope '{}'", context.charter_version, context.target);
    println!("Chain: {}", chain);
    println!();

    for severity in Severity::ALL {
        let count = context.severity_count(severity);
        println!("{} ({})", severity, count);
        for (category, rule) in context.rules_with_severity(severity) {
            println!("  {:<10} {:<10} {}", rule.id, category, rule.rule);
        }
    }

    println!();
    if let Some(role) = &context.behavior.role {
        println!("Role: {}", role);
    }
    if let Some(tone) = &context.behavior.tone {
        if let Some(voice) = &tone.voice {
            println!("Voice: {}", voice);
        }
        if let Some(verbosity) = &tone.verbosity {
            println!("Verbosity: {}", verbosity);
        }
    }
    for (name, persona) in &context.behavior.personas {
        println!(
            "Persona {}: focus={}, verbosity={}",
            name,
            persona.focus.as_deref().unwrap_or("-"),
            persona.verbosity.as_deref().unwrap_or("-"),
        );
    }

    Ok(())
}
