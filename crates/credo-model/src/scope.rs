// scope.rs — Scope keys and the precedence chain.
//
// Precedence is total: global < team < project < user < session. Team,
// project, and user scopes are parameterized by a name; at most one
// configuration fragment exists per concrete key. The chain is an explicit
// value constructed per compilation run — never ambient state.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A named level in the scope precedence hierarchy.
///
/// Parses from and displays as `global`, `team:<name>`, `project:<name>`,
/// `user:<name>`, `session`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScopeKey {
    Global,
    Team(String),
    Project(String),
    User(String),
    Session,
}

impl ScopeKey {
    /// Position in the precedence order (0 = lowest).
    pub fn level(&self) -> u8 {
        match self {
            ScopeKey::Global => 0,
            ScopeKey::Team(_) => 1,
            ScopeKey::Project(_) => 2,
            ScopeKey::User(_) => 3,
            ScopeKey::Session => 4,
        }
    }

    /// Registry-relative path of this scope's behavior document.
    ///
    /// `behavior/global.yaml`, `behavior/team/<name>.yaml`,
    /// `behavior/project/<name>.yaml`, `behavior/user/<name>.yaml`,
    /// `behavior/session.yaml`.
    pub fn behavior_rel_path(&self) -> PathBuf {
        let mut path = PathBuf::from("behavior");
        match self {
            ScopeKey::Global => path.push("global.yaml"),
            ScopeKey::Team(name) => {
                path.push("team");
                path.push(format!("{}.yaml", name));
            }
            ScopeKey::Project(name) => {
                path.push("project");
                path.push(format!("{}.yaml", name));
            }
            ScopeKey::User(name) => {
                path.push("user");
                path.push(format!("{}.yaml", name));
            }
            ScopeKey::Session => path.push("session.yaml"),
        }
        path
    }
}

impl std::fmt::Display for ScopeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScopeKey::Global => write!(f, "global"),
            ScopeKey::Team(name) => write!(f, "team:{}", name),
            ScopeKey::Project(name) => write!(f, "project:{}", name),
            ScopeKey::User(name) => write!(f, "user:{}", name),
            ScopeKey::Session => write!(f, "session"),
        }
    }
}

impl FromStr for ScopeKey {
    type Err = ScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            None => match s {
                "global" => Ok(ScopeKey::Global),
                "session" => Ok(ScopeKey::Session),
                "team" | "project" | "user" => Err(ScopeError::MissingName {
                    level: s.to_string(),
                }),
                other => Err(ScopeError::UnknownScope {
                    input: other.to_string(),
                }),
            },
            Some((level, name)) => {
                if name.is_empty() {
                    return Err(ScopeError::MissingName {
                        level: level.to_string(),
                    });
                }
                match level {
                    "team" => Ok(ScopeKey::Team(name.to_string())),
                    "project" => Ok(ScopeKey::Project(name.to_string())),
                    "user" => Ok(ScopeKey::User(name.to_string())),
                    "global" | "session" => Err(ScopeError::UnexpectedName {
                        level: level.to_string(),
                    }),
                    other => Err(ScopeError::UnknownScope {
                        input: other.to_string(),
                    }),
                }
            }
        }
    }
}

impl Serialize for ScopeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ScopeKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The ordered list of scopes a compilation run resolves through.
///
/// Always starts at `global` and ascends strictly in precedence; the last
/// element is the target scope. Constructed fresh per run from the
/// requested target — there is no global precedence state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeChain {
    keys: Vec<ScopeKey>,
}

impl ScopeChain {
    /// Build a chain, validating order.
    ///
    /// Fails if the chain is empty, does not begin at `global`, or does not
    /// strictly ascend in precedence (which also rules out two fragments at
    /// the same level).
    pub fn new(keys: Vec<ScopeKey>) -> Result<Self, ScopeError> {
        let first = keys.first().ok_or(ScopeError::EmptyChain)?;
        if *first != ScopeKey::Global {
            return Err(ScopeError::ChainMissingGlobal {
                first: first.to_string(),
            });
        }
        for pair in keys.windows(2) {
            if pair[1].level() <= pair[0].level() {
                return Err(ScopeError::ChainOutOfOrder {
                    prev: pair[0].to_string(),
                    next: pair[1].to_string(),
                });
            }
        }
        Ok(ScopeChain { keys })
    }

    /// The chain containing only the global scope.
    pub fn global() -> Self {
        ScopeChain {
            keys: vec![ScopeKey::Global],
        }
    }

    /// The target scope (highest precedence, last in the chain).
    pub fn target(&self) -> &ScopeKey {
        // Non-empty by construction.
        self.keys.last().unwrap()
    }

    pub fn keys(&self) -> &[ScopeKey] {
        &self.keys
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScopeKey> {
        self.keys.iter()
    }
}

impl std::fmt::Display for ScopeChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined: Vec<String> = self.keys.iter().map(|k| k.to_string()).collect();
        write!(f, "{}", joined.join(" < "))
    }
}

/// Errors from scope-key parsing and chain construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    #[error("unknown scope '{input}' (expected global, team:<name>, project:<name>, user:<name>, or session)")]
    UnknownScope { input: String },

    #[error("scope level '{level}' requires a name (e.g. '{level}:backend')")]
    MissingName { level: String },

    #[error("scope level '{level}' does not take a name")]
    UnexpectedName { level: String },

    #[error("scope chain is empty")]
    EmptyChain,

    #[error("scope chain must start at 'global', found '{first}'")]
    ChainMissingGlobal { first: String },

    #[error("scope chain must ascend in precedence: '{next}' cannot follow '{prev}'")]
    ChainOutOfOrder { prev: String, next: String },
}
