//! Relation tree construction
//!
//! Every comparison identifier of a predicate names a chain of relations plus a
//! terminal field (`salaries.salary`). The tree builder merges all of those
//! relation chains into one prefix tree, so a relation reached by several
//! comparisons is joined exactly once.
//!
//! Only relation segments enter the tree: the last segment of each identifier
//! is the field itself and is dropped, and an identifier without a dot (a field
//! on the root entity) contributes nothing.

use serde::Serialize;

use super::alias_resolver::{resolve_identifier, AliasMap};
use crate::predicate_parser::ast::PredicateNode;

/// One relation path segment in the join plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RelationNode {
    pub name: String,
    pub children: Vec<RelationNode>,
}

impl RelationNode {
    pub fn new(name: impl Into<String>) -> Self {
        RelationNode {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// The synthetic, unnamed root of a join plan
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, name: &str) -> Option<&RelationNode> {
        self.children.iter().find(|child| child.name == name)
    }

    // Siblings are few, so a linear scan keeps insertion order for free.
    fn child_or_insert(&mut self, name: &str) -> &mut RelationNode {
        let index = match self.children.iter().position(|child| child.name == name) {
            Some(index) => index,
            None => {
                log::trace!("new relation node '{}' under '{}'", name, self.name);
                self.children.push(RelationNode::new(name));
                self.children.len() - 1
            }
        };
        &mut self.children[index]
    }

    /// Insert a chain of relation segments below this node, reusing existing children
    pub fn insert_path<'a, I>(&mut self, segments: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut current = self;
        for segment in segments {
            current = current.child_or_insert(segment);
        }
    }

    /// Whether `path` (relation segments below this node) is present
    pub fn contains_path(&self, path: &[&str]) -> bool {
        let mut current = self;
        for segment in path {
            match current.child(segment) {
                Some(child) => current = child,
                None => return false,
            }
        }
        true
    }

    /// Every root-to-leaf relation chain as a dotted path, in insertion order
    pub fn leaf_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        for child in &self.children {
            child.collect_leaf_paths(String::new(), &mut paths);
        }
        paths
    }

    fn collect_leaf_paths(&self, prefix: String, out: &mut Vec<String>) {
        let path = if prefix.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", prefix, self.name)
        };
        if self.children.is_empty() {
            out.push(path);
        } else {
            for child in &self.children {
                child.collect_leaf_paths(path.clone(), out);
            }
        }
    }

    /// Number of relation nodes below this one
    pub fn relation_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.relation_count())
            .sum()
    }
}

/// Relation segments of an identifier: every dot-separated segment but the last
pub fn relation_segments(identifier: &str) -> Vec<&str> {
    let mut segments: Vec<&str> = identifier.split('.').collect();
    segments.pop();
    segments
}

/// Accumulates the relation paths of one or more predicates into a shared tree
#[derive(Debug)]
pub struct RelationTreeBuilder<'a> {
    root: RelationNode,
    aliases: Option<&'a AliasMap>,
}

impl<'a> RelationTreeBuilder<'a> {
    pub fn new(aliases: Option<&'a AliasMap>) -> Self {
        Self {
            root: RelationNode::root(),
            aliases,
        }
    }

    pub fn insert(&mut self, node: &PredicateNode) {
        match node {
            PredicateNode::Logical(logical) => {
                for constraint in &logical.constraints {
                    self.insert(constraint);
                }
            }
            PredicateNode::Comparison(comparison) => {
                let identifier = resolve_identifier(&comparison.args.identifier, self.aliases);
                if identifier.split('.').any(str::is_empty) {
                    log::warn!(
                        "identifier '{}' has an empty path segment; keeping it as an unnamed relation",
                        identifier
                    );
                }
                self.root.insert_path(relation_segments(identifier));
            }
        }
    }

    pub fn tree(&self) -> &RelationNode {
        &self.root
    }

    pub fn finish(self) -> RelationNode {
        self.root
    }
}
