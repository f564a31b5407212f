//! Relation compilation: predicate AST → join plan tree → relation expression.
//!
//! A [`Relation`] is built once from a predicate and an optional alias map and
//! is immutable afterwards. The tree is the structured join plan; the
//! expression is its compact text form (`salaries`, `a.b.c`, `[a,b]`), which a
//! query executor reads to decide what to join or eager-load.

use serde::Serialize;
use serde_json::Value;

use crate::predicate_parser::ast::PredicateNode;

pub mod alias_resolver;
pub mod errors;
pub mod expression;
pub mod tree_builder;

pub use alias_resolver::AliasMap;
use errors::RelationCompileError;
pub use tree_builder::RelationNode;
use tree_builder::RelationTreeBuilder;

/// Knobs for a single compile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// Reject identifiers with empty path segments (`.a`, `a..b`, `a.` or an
    /// empty identifier) instead of turning them into unnamed relations.
    pub strict_identifiers: bool,
}

impl CompileOptions {
    pub fn strict() -> Self {
        Self {
            strict_identifiers: true,
        }
    }
}

/// The compiled join plan of one predicate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relation {
    expression: String,
    tree: RelationNode,
}

impl Relation {
    /// Compile `ast` permissively; this never fails.
    pub fn new(ast: &PredicateNode, aliases: Option<&AliasMap>) -> Self {
        let mut builder = RelationTreeBuilder::new(aliases);
        builder.insert(ast);
        let tree = builder.finish();
        let expression = expression::serialize(&tree);
        log::debug!(
            "compiled relation expression '{}' ({} relations)",
            expression,
            tree.relation_count()
        );
        Relation { expression, tree }
    }

    pub fn compile(
        ast: &PredicateNode,
        aliases: Option<&AliasMap>,
        options: &CompileOptions,
    ) -> Result<Self, RelationCompileError> {
        if options.strict_identifiers {
            check_identifiers(ast, aliases)?;
        }
        Ok(Self::new(ast, aliases))
    }

    /// Lower a tagged JSON predicate and compile it
    pub fn from_json(
        value: &Value,
        aliases: Option<&AliasMap>,
        options: &CompileOptions,
    ) -> Result<Self, RelationCompileError> {
        let ast = PredicateNode::from_json(value)?;
        Self::compile(&ast, aliases, options)
    }

    pub fn tree(&self) -> &RelationNode {
        &self.tree
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Whether the predicate touches only fields of the root entity
    pub fn is_empty(&self) -> bool {
        self.tree.is_leaf()
    }

    pub fn into_parts(self) -> (RelationNode, String) {
        (self.tree, self.expression)
    }
}

fn check_identifiers(
    ast: &PredicateNode,
    aliases: Option<&AliasMap>,
) -> Result<(), RelationCompileError> {
    for identifier in ast.identifiers() {
        let resolved = alias_resolver::resolve_identifier(identifier, aliases);
        if resolved.split('.').any(str::is_empty) {
            return Err(RelationCompileError::EmptyPathSegment {
                identifier: resolved.to_string(),
            });
        }
    }
    Ok(())
}
