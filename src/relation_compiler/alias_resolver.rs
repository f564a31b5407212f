//! Alias resolution for search identifiers
//!
//! Callers may expose short field names (`salary`) that stand for a dotted
//! relation path (`salaries.salary`). Resolution is a single lookup: the
//! canonical path of an alias is never itself looked up again.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::AliasMapError;
use crate::predicate_parser::ast::{ComparisonArgs, ComparisonNode, LogicalNode, PredicateNode};

/// Short identifier → canonical dotted path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasMap {
    aliases: HashMap<String, String>,
}

impl AliasMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, alias: impl Into<String>, canonical: impl Into<String>) {
        self.aliases.insert(alias.into(), canonical.into());
    }

    pub fn get(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Canonical path for `identifier`, or `identifier` itself when it is not an alias
    pub fn resolve<'a>(&'a self, identifier: &'a str) -> &'a str {
        match self.aliases.get(identifier) {
            Some(canonical) => {
                log::trace!("alias '{}' → '{}'", identifier, canonical);
                canonical.as_str()
            }
            None => identifier,
        }
    }

    /// Load a flat `alias: canonical.path` mapping from YAML (or JSON) text
    pub fn from_yaml_str(yaml: &str) -> Result<Self, AliasMapError> {
        serde_yaml::from_str(yaml).map_err(|e| AliasMapError::ParseError {
            error: e.to_string(),
        })
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, AliasMapError> {
        let contents =
            std::fs::read_to_string(path.as_ref()).map_err(|e| AliasMapError::ReadError {
                error: format!("{}: {}", path.as_ref().display(), e),
            })?;
        let aliases = Self::from_yaml_str(&contents)?;
        log::debug!(
            "loaded {} aliases from {}",
            aliases.len(),
            path.as_ref().display()
        );
        Ok(aliases)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AliasMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        AliasMap {
            aliases: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Resolve `identifier` against an optional alias map
pub fn resolve_identifier<'a>(identifier: &'a str, aliases: Option<&'a AliasMap>) -> &'a str {
    match aliases {
        Some(aliases) => aliases.resolve(identifier),
        None => identifier,
    }
}

/// Copy of `node` with every comparison identifier resolved. The input is left untouched.
pub fn resolve_predicate(node: &PredicateNode, aliases: Option<&AliasMap>) -> PredicateNode {
    match node {
        PredicateNode::Logical(logical) => PredicateNode::Logical(LogicalNode {
            operator: logical.operator,
            constraints: logical
                .constraints
                .iter()
                .map(|constraint| resolve_predicate(constraint, aliases))
                .collect(),
        }),
        PredicateNode::Comparison(comparison) => PredicateNode::Comparison(ComparisonNode {
            operator: comparison.operator,
            args: ComparisonArgs {
                identifier: resolve_identifier(&comparison.args.identifier, aliases).to_string(),
                value: comparison.args.value.clone(),
            },
        }),
    }
}
