//! Front door: predicate text (or JSON AST) → normalized AST + relation.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::predicate_parser::{self, ast::PredicateNode};
use crate::relation_compiler::{
    alias_resolver::resolve_predicate, errors::RelationCompileError, AliasMap, CompileOptions,
    Relation,
};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CompileError {
    #[error("Predicate parse error at byte {offset}:\n{message}")]
    Parse { offset: usize, message: String },

    #[error(transparent)]
    Relation(#[from] RelationCompileError),
}

/// A predicate with aliases resolved, plus the join plan it needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledPredicate {
    pub predicate: PredicateNode,
    pub relation: Relation,
}

impl CompiledPredicate {
    pub fn expression(&self) -> &str {
        self.relation.expression()
    }
}

pub fn compile_predicate(
    input: &str,
    aliases: Option<&AliasMap>,
    options: &CompileOptions,
) -> Result<CompiledPredicate, CompileError> {
    let ast = predicate_parser::parse_predicate(input).map_err(|e| CompileError::Parse {
        offset: e.offset_in(input).unwrap_or(0),
        message: e.to_string(),
    })?;
    compile_ast(&ast, aliases, options)
}

pub fn compile_json(
    value: &Value,
    aliases: Option<&AliasMap>,
    options: &CompileOptions,
) -> Result<CompiledPredicate, CompileError> {
    let ast = PredicateNode::from_json(value)?;
    compile_ast(&ast, aliases, options)
}

pub fn compile_ast(
    ast: &PredicateNode,
    aliases: Option<&AliasMap>,
    options: &CompileOptions,
) -> Result<CompiledPredicate, CompileError> {
    let relation = Relation::compile(ast, aliases, options)?;
    Ok(CompiledPredicate {
        predicate: resolve_predicate(ast, aliases),
        relation,
    })
}
