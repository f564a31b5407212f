//! Lowering of dynamically-typed JSON predicate nodes into [`PredicateNode`].
//!
//! Upstream parsers may hand over the predicate as a JSON document whose nodes
//! are discriminated by a `type` tag:
//!
//! ```json
//! { "type": "logical", "operator": "match_all", "constraints": [
//!     { "type": "comparison", "operator": "geq",
//!       "args": { "identifier": "salaries.salary", "value": 60000 } }
//! ] }
//! ```
//!
//! Anything that is not exactly one of the two known node shapes is rejected
//! with [`RelationCompileError::InvalidPredicateNode`], naming the location of
//! the offending node.

use serde_json::{Map, Value};

use super::ast::{is_quotable, ComparisonOperator, Literal, LogicalOperator, PredicateNode};
use crate::relation_compiler::errors::RelationCompileError;

impl PredicateNode {
    pub fn from_json(value: &Value) -> Result<Self, RelationCompileError> {
        lower_node(value, "$")
    }
}

impl TryFrom<&Value> for PredicateNode {
    type Error = RelationCompileError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        PredicateNode::from_json(value)
    }
}

fn invalid(path: &str, reason: impl Into<String>) -> RelationCompileError {
    RelationCompileError::InvalidPredicateNode {
        path: path.to_string(),
        reason: reason.into(),
    }
}

fn lower_node(value: &Value, path: &str) -> Result<PredicateNode, RelationCompileError> {
    let object = value
        .as_object()
        .ok_or_else(|| invalid(path, "node is not an object"))?;

    let tag = object
        .get("type")
        .ok_or_else(|| invalid(path, "missing `type` tag"))?;

    match tag.as_str() {
        Some("logical") => lower_logical(object, path),
        Some("comparison") => lower_comparison(object, path),
        Some(other) => Err(invalid(path, format!("unrecognized node type `{}`", other))),
        None => Err(invalid(path, "`type` tag is not a string")),
    }
}

fn operator_keyword<'a>(object: &'a Map<String, Value>, path: &str) -> Result<&'a str, RelationCompileError> {
    object
        .get("operator")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid(path, "missing or non-string `operator`"))
}

fn lower_logical(
    object: &Map<String, Value>,
    path: &str,
) -> Result<PredicateNode, RelationCompileError> {
    let keyword = operator_keyword(object, path)?;
    let operator = LogicalOperator::from_keyword(keyword)
        .ok_or_else(|| invalid(path, format!("unknown logical operator `{}`", keyword)))?;

    let constraints = object
        .get("constraints")
        .and_then(Value::as_array)
        .ok_or_else(|| invalid(path, "logical node without a `constraints` array"))?;

    let constraints = constraints
        .iter()
        .enumerate()
        .map(|(i, child)| lower_node(child, &format!("{}.constraints[{}]", path, i)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PredicateNode::logical(operator, constraints))
}

fn lower_comparison(
    object: &Map<String, Value>,
    path: &str,
) -> Result<PredicateNode, RelationCompileError> {
    let keyword = operator_keyword(object, path)?;
    let operator = ComparisonOperator::from_keyword(keyword)
        .ok_or_else(|| invalid(path, format!("unknown comparison operator `{}`", keyword)))?;

    let args = object
        .get("args")
        .and_then(Value::as_object)
        .ok_or_else(|| invalid(path, "comparison node without an `args` object"))?;

    let identifier = args
        .get("identifier")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid(path, "comparison without a string `args.identifier`"))?;
    if !is_quotable(identifier) {
        return Err(invalid(path, "identifier mixes single and double quotes"));
    }

    let value = args
        .get("value")
        .ok_or_else(|| invalid(path, "comparison without `args.value`"))?;

    Ok(PredicateNode::comparison(
        operator,
        identifier,
        lower_literal(value, path)?,
    ))
}

fn lower_literal(value: &Value, path: &str) -> Result<Literal, RelationCompileError> {
    match value {
        Value::Null => Ok(Literal::Null),
        Value::Bool(b) => Ok(Literal::Boolean(*b)),
        Value::String(s) if is_quotable(s) => Ok(Literal::String(s.clone())),
        Value::String(_) => Err(invalid(path, "string value mixes single and double quotes")),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Literal::Integer(i))
            } else if let Some(f) = n.as_f64().filter(|f| f.is_finite()) {
                Ok(Literal::Float(f))
            } else {
                Err(invalid(path, format!("numeric value {} out of range", n)))
            }
        }
        Value::Array(_) | Value::Object(_) => {
            Err(invalid(path, "comparison value must be a scalar"))
        }
    }
}
