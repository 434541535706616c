pub mod apply;
pub mod doctor;
pub mod schema;

use credo_model::{ScopeChain, ScopeKey};

/// Build the precedence chain from repeated `--scope` flags.
///
/// A leading `global` may be omitted; the chain value enforces ascending
/// precedence and rejects duplicates.
pub fn parse_chain(scopes: &[String]) -> anyhow::Result<ScopeChain> {
    let mut keys: Vec<ScopeKey> = Vec::new();
    for scope in scopes {
        keys.push(scope.parse()?);
    }
    if keys.first() != Some(&ScopeKey::Global) {
        keys.insert(0, ScopeKey::Global);
    }
    Ok(ScopeChain::new(keys)?)
}
