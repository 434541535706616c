// render.rs — Deterministic artifact rendering.
//
// Rendering is a pure function of the ResolvedContext: no timestamps, no
// environment, no randomness. Severity sections come in fixed order;
// within a section categories keep first-seen order and rules keep display
// order. Security-tagged rules appear twice — once in their severity
// section, once in the cross-cutting security view.

use credo_model::{Artifact, PolicyRule, ResolvedContext, Severity};

use crate::inject::{BEGIN_MARKER, END_MARKER};

/// Repository-relative path of the primary rules document.
pub const PRIMARY_ARTIFACT_PATH: &str = "AGENTS.md";

/// The two consuming tools' command directories. Both receive identical
/// content.
pub const COMMAND_DIRS: [&str; 2] = [".claude/commands", ".augment/commands"];

/// Names of the generated slash-command prompts.
pub const COMMAND_NAMES: [&str; 6] = [
    "credo-validate",
    "credo-rules",
    "credo-checkpoint",
    "credo-review",
    "credo-security",
    "credo-refresh",
];

/// Render every artifact for one compilation run: the primary managed
/// region plus the command prompts mirrored into both tool directories.
pub fn render_artifacts(context: &ResolvedContext) -> Vec<Artifact> {
    let mut artifacts = vec![Artifact::managed(
        PRIMARY_ARTIFACT_PATH,
        render_policy_region(context),
        BEGIN_MARKER,
        END_MARKER,
    )];

    for (name, body) in render_command_docs(context) {
        for dir in COMMAND_DIRS {
            artifacts.push(Artifact::owned(format!("{}/{}.md", dir, name), body.clone()));
        }
    }

    tracing::debug!("rendered {} artifact(s)", artifacts.len());
    artifacts
}

fn severity_heading(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "### Critical (Must Follow)",
        Severity::Warning => "### Required (Should Follow)",
        Severity::Info => "### Recommended",
    }
}

fn severity_badge(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "🔴",
        Severity::Warning => "🟡",
        Severity::Info => "🔵",
    }
}

/// The managed-region body of the primary artifact.
pub fn render_policy_region(context: &ResolvedContext) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("<!-- Auto-generated by Credo. Do not edit manually; edit the".to_string());
    lines.push("     policy registry and re-run `credo apply`. -->".to_string());
    lines.push(String::new());
    lines.push("## Policy Compliance".to_string());
    lines.push(String::new());
    lines.push(format!(
        "Policy charter {} resolved for scope `{}`. The rules below are",
        context.charter_version, context.target
    ));
    lines.push("binding constraints: when other guidance conflicts, these policies".to_string());
    lines.push("take precedence.".to_string());
    lines.push(String::new());

    for severity in Severity::ALL {
        lines.push(severity_heading(severity).to_string());
        lines.push(String::new());
        let mut current_category: Option<&str> = None;
        let mut empty = true;
        for (category, rule) in context.rules_with_severity(severity) {
            if current_category != Some(category) {
                lines.push(format!("**{}**", category));
                lines.push(String::new());
                current_category = Some(category);
            }
            push_rule(&mut lines, rule);
            empty = false;
        }
        if empty {
            lines.push("_No rules at this severity._".to_string());
            lines.push(String::new());
        }
    }

    lines.push("## Security Considerations".to_string());
    lines.push(String::new());
    let mut any_security = false;
    for (category, rule) in context.security_rules() {
        lines.push(format!(
            "- {} **{}** ({}): {}",
            severity_badge(rule.severity),
            rule.id,
            category,
            rule.rule
        ));
        any_security = true;
    }
    if !any_security {
        lines.push("_No security-tagged rules._".to_string());
    }
    lines.push(String::new());

    render_behavior_section(&mut lines, context);
    render_commands_section(&mut lines);

    // Single trailing newline is the injector's concern; the region body
    // ends without one so markers land on their own lines.
    let mut body = lines.join("\n");
    while body.ends_with('\n') {
        body.pop();
    }
    body
}

fn push_rule(lines: &mut Vec<String>, rule: &PolicyRule) {
    lines.push(format!("- **{}**: {}", rule.id, rule.rule));
    if let Some(rationale) = &rule.rationale {
        lines.push(format!("  - Rationale: {}", rationale));
    }
    if let Some(violation) = &rule.example_violation {
        lines.push(format!("  - Avoid: `{}`", violation));
    }
    if let Some(fix) = &rule.example_fix {
        lines.push(format!("  - Prefer: `{}`", fix));
    }
    lines.push(String::new());
}

fn render_behavior_section(lines: &mut Vec<String>, context: &ResolvedContext) {
    let behavior = &context.behavior;
    lines.push("## Agent Behavior Calibration".to_string());
    lines.push(String::new());

    if let Some(role) = &behavior.role {
        lines.push(format!("**Role:** {}", role));
    }
    if let Some(tone) = &behavior.tone {
        if let Some(voice) = &tone.voice {
            lines.push(format!("**Voice:** {}", voice));
        }
        if let Some(verbosity) = &tone.verbosity {
            lines.push(format!("**Verbosity:** {}", verbosity));
        }
        if let Some(formatting) = &tone.formatting {
            lines.push("**Formatting:**".to_string());
            for item in formatting {
                lines.push(format!("- {}", item));
            }
        }
    }
    lines.push(String::new());

    if !behavior.defaults.is_empty() {
        lines.push("**Development Defaults:**".to_string());
        for (key, value) in &behavior.defaults {
            lines.push(format!("- {}: {}", key, value));
        }
        lines.push(String::new());
    }

    if let Some(checklist) = &behavior.reviewer_checklist {
        lines.push("**Review Checklist:**".to_string());
        for item in checklist {
            lines.push(format!("- {}", item));
        }
        lines.push(String::new());
    }

    if let Some(scenarios) = &behavior.ask_when_unsure {
        lines.push("**Ask Before Proceeding With:**".to_string());
        for item in scenarios {
            lines.push(format!("- {}", item));
        }
        lines.push(String::new());
    }

    if !behavior.personas.is_empty() {
        lines.push("**Personas:**".to_string());
        for (name, persona) in &behavior.personas {
            let mut parts = Vec::new();
            if let Some(focus) = &persona.focus {
                parts.push(format!("focus: {}", focus));
            }
            if let Some(verbosity) = &persona.verbosity {
                parts.push(format!("verbosity: {}", verbosity));
            }
            lines.push(format!("- `{}` — {}", name, parts.join(", ")));
        }
        lines.push(String::new());
    }
}

fn render_commands_section(lines: &mut Vec<String>) {
    lines.push("## Assistant Commands".to_string());
    lines.push(String::new());
    lines.push("Slash commands generated alongside this document:".to_string());
    lines.push(String::new());
    lines.push("- `/credo-validate` — check recent work against these policies".to_string());
    lines.push("- `/credo-rules` — recite the active rules from memory".to_string());
    lines.push("- `/credo-checkpoint` — periodic policy-recall self-check".to_string());
    lines.push("- `/credo-review` — review a change with the reviewer persona".to_string());
    lines.push("- `/credo-security` — focused security pass".to_string());
    lines.push("- `/credo-refresh` — re-read this document after registry updates".to_string());
    lines.push(String::new());
}

/// The command prompt documents, as `(name, content)` pairs.
///
/// Pure AI prompts — no shell blocks, no CLI invocations. Parameterized
/// only by small excerpts of the context (severity counts, category
/// names); the full rule text lives in the primary artifact they point at.
pub fn render_command_docs(context: &ResolvedContext) -> Vec<(String, String)> {
    let critical = context.severity_count(Severity::Critical);
    let warning = context.severity_count(Severity::Warning);
    let info = context.severity_count(Severity::Info);
    let total = context.rule_count();
    let categories = context.category_names().join(", ");

    let docs = vec![
        (
            "credo-validate",
            "Validate recent work against policy",
            format!(
                "Read the Policy Compliance section of AGENTS.md, then review the\n\
                 changes from this session against it.\n\n\
                 There are {} active rules ({} critical, {} warning, {} info)\n\
                 across these categories: {}.\n\n\
                 For each violation you find, cite the rule id, point at the\n\
                 offending change, and propose a fix. If everything complies,\n\
                 say so explicitly.",
                total, critical, warning, info, categories
            ),
        ),
        (
            "credo-rules",
            "Recite the active policy rules",
            format!(
                "Without re-reading AGENTS.md first, list every policy rule you\n\
                 remember, grouped by severity. Then open AGENTS.md and compare:\n\
                 there should be {} rules. Note any you forgot or misstated —\n\
                 those are the ones to re-read carefully.",
                total
            ),
        ),
        (
            "credo-checkpoint",
            "Periodic policy-recall self-check",
            format!(
                "Pause and verify policy compliance. Recall the {} critical\n\
                 rules from AGENTS.md and check your last few responses against\n\
                 them. If you cannot recall them precisely, re-read the Policy\n\
                 Compliance section of AGENTS.md before continuing.",
                critical
            ),
        ),
        (
            "credo-review",
            "Review a change against the charter",
            "Adopt the reviewer persona defined in AGENTS.md (Agent Behavior\n\
             Calibration, Personas). Review the change the user points you at\n\
             against the Policy Compliance section and the review checklist,\n\
             citing rule ids for every finding."
                .to_string(),
        ),
        (
            "credo-security",
            "Focused security pass",
            "Work through the Security Considerations section of AGENTS.md and\n\
             audit the current changes against each security rule in turn.\n\
             Treat critical rules as blocking. Report findings per rule id,\n\
             including rules with no findings."
                .to_string(),
        ),
        (
            "credo-refresh",
            "Re-read policies after a registry update",
            "The policy registry may have changed. Re-read AGENTS.md in full —\n\
             both the Policy Compliance and Agent Behavior Calibration\n\
             sections — and state the role, voice, and rule counts you are now\n\
             operating under."
                .to_string(),
        ),
    ];

    docs.into_iter()
        .map(|(name, description, prompt)| {
            let content = format!(
                "---\ndescription: {}\n---\n\n# /{}\n\n{}\n",
                description, name, prompt
            );
            (name.to_string(), content)
        })
        .collect()
}
