// resolve.rs — Scope resolution: charter + behavior fragments → one
// effective configuration.
//
// Rule resolution walks the chain ascending and keys rules by id: a
// re-declared id replaces the definition but keeps the display slot of its
// first declaration, so output order never depends on which scope last
// touched a rule. Categories keep first-seen order. The only map here is a
// lookup index — every ordered structure is a Vec, so resolution is
// byte-for-byte deterministic for a given (charter, chain) pair.
//
// Resolution cannot fail: the registry loader has already rejected unknown
// scope keys, malformed severities, and duplicate ids.

use std::collections::HashMap;

use credo_model::{
    BehaviorConfig, Charter, ResolvedCategory, ResolvedContext, ScopeChain, ScopeKey,
};

/// Resolve the effective configuration for the chain's target scope.
///
/// Walks the chain from `global` to the target, inclusive, ascending.
/// Behavior fragments merge field-wise (scalars overwrite, objects merge
/// one level deep, lists overwrite wholesale); rules replace by id.
pub fn resolve(
    charter: &Charter,
    behaviors: &[(ScopeKey, BehaviorConfig)],
    chain: &ScopeChain,
) -> ResolvedContext {
    let mut categories: Vec<ResolvedCategory> = Vec::new();
    // rule id → (category index, rule index) of the first declaration.
    let mut display_slot: HashMap<String, (usize, usize)> = HashMap::new();
    let mut category_index: HashMap<String, usize> = HashMap::new();

    for key in chain.iter() {
        let Some(fragment) = charter.fragment(key) else {
            continue;
        };
        for category in &fragment.categories {
            for rule in &category.rules {
                if let Some(&(ci, ri)) = display_slot.get(&rule.id) {
                    // Same id at higher precedence: replace the definition
                    // wholesale, keep the original display position.
                    categories[ci].rules[ri] = rule.clone();
                } else {
                    let ci = match category_index.get(&category.name) {
                        Some(&ci) => ci,
                        None => {
                            categories.push(ResolvedCategory {
                                name: category.name.clone(),
                                rules: Vec::new(),
                            });
                            let ci = categories.len() - 1;
                            category_index.insert(category.name.clone(), ci);
                            ci
                        }
                    };
                    categories[ci].rules.push(rule.clone());
                    display_slot.insert(rule.id.clone(), (ci, categories[ci].rules.len() - 1));
                }
            }
        }
    }

    let mut behavior = BehaviorConfig::default();
    for key in chain.iter() {
        if let Some((_, fragment)) = behaviors.iter().find(|(k, _)| k == key) {
            behavior.merge_from(fragment);
        }
    }

    let context = ResolvedContext {
        charter_version: charter.version.clone(),
        target: chain.target().clone(),
        categories,
        behavior,
    };
    tracing::debug!(
        "resolved {} rule(s) in {} categorie(s) for scope '{}'",
        context.rule_count(),
        context.categories.len(),
        context.target
    );
    context
}
