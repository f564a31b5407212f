//! Error types for relation compilation and alias-map loading.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RelationCompileError {
    #[error("Invalid predicate node at {path}: {reason}")]
    InvalidPredicateNode { path: String, reason: String },

    #[error("Identifier `{identifier}` contains an empty path segment")]
    EmptyPathSegment { identifier: String },
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AliasMapError {
    #[error("Failed to read alias file: {error}")]
    ReadError { error: String },

    #[error("Failed to parse alias map: {error}")]
    ParseError { error: String },
}
