//! relplan - search predicate compiler
//!
//! This crate turns a search predicate into what a query executor needs:
//! - a predicate AST, parsed from the `match_all: { geq: [...] }` DSL or
//!   lowered from a tagged JSON document
//! - the same AST with field aliases resolved to canonical dotted paths
//! - a deduplicated relation tree (join plan) and its compact relation
//!   expression (`salaries`, `a.b.c`, `[a,b]`)

pub mod compiler;
pub mod config;
pub mod predicate_parser;
pub mod relation_compiler;

pub use compiler::{compile_ast, compile_json, compile_predicate, CompileError, CompiledPredicate};
pub use relation_compiler::{AliasMap, CompileOptions, Relation, RelationNode};
