//! Core types for the skill domain registry.
//!
//! Domains and skills are derived state: they are rebuilt from disk on every
//! discovery call and never mutated once the registry has been assembled.

use crate::descriptor::DescriptorError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

// --- Enumerations ---

/// Execution backend that runs a skill's logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Bridge {
    Python,
}

impl Bridge {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Python => "python",
        }
    }
}

impl std::str::FromStr for Bridge {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "python" => Ok(Self::Python),
            _ => Err(DescriptorError::UnknownBridge(s.to_string())),
        }
    }
}

impl std::fmt::Display for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the domain scanner treats a domain whose scan fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanPolicy {
    /// The first failure (in directory-name order) aborts discovery.
    #[default]
    FailFast,
    /// Failing domains are left out and reported next to the registry.
    BestEffort,
}

impl ScanPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FailFast => "fail_fast",
            Self::BestEffort => "best_effort",
        }
    }
}

// --- Registry entities ---

/// One capability inside a domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    /// Declared name from `skill.json`.
    pub name: String,
    /// Directory name of the skill inside its domain.
    pub alias: String,
    /// Path of the skill directory.
    pub path: PathBuf,
    pub bridge: Bridge,
}

/// A named grouping of skills backed by one directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    /// Declared name from `domain.json`.
    pub name: String,
    /// Directory name under the domains root.
    pub directory: String,
    /// Path of the domain directory.
    pub path: PathBuf,
    /// Skills keyed by declared name.
    pub skills: BTreeMap<String, Skill>,
}

impl Domain {
    /// Look up a skill by its declared name.
    pub fn skill(&self, name: &str) -> Option<&Skill> {
        self.skills.get(name)
    }
}

/// Domains keyed by declared name.
///
/// Built fresh for every discovery call; there is no identity beyond the
/// lifetime of the value handed to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry(BTreeMap<String, Domain>);

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a domain under its declared name, returning the entry it replaced.
    pub fn insert(&mut self, domain: Domain) -> Option<Domain> {
        self.0.insert(domain.name.clone(), domain)
    }

    pub fn domain(&self, name: &str) -> Option<&Domain> {
        self.0.get(name)
    }

    /// Look up a skill by declared domain name and declared skill name.
    pub fn skill(&self, domain: &str, skill: &str) -> Option<&Skill> {
        self.domain(domain).and_then(|d| d.skill(skill))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of skills across all domains.
    pub fn skill_count(&self) -> usize {
        self.0.values().map(|d| d.skills.len()).sum()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = (&'a String, &'a Domain);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Domain>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
