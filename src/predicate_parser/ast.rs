use std::fmt;

use serde::Serialize;

/// Boolean combinator of a logical node
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalOperator {
    /// Every constraint must hold
    MatchAll,
    /// At least one constraint must hold
    MatchAny,
}

impl LogicalOperator {
    pub fn keyword(&self) -> &'static str {
        match self {
            LogicalOperator::MatchAll => "match_all",
            LogicalOperator::MatchAny => "match_any",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "match_all" => Some(LogicalOperator::MatchAll),
            "match_any" => Some(LogicalOperator::MatchAny),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    Eq,
    Neq,
    Gt,
    Geq,
    Lt,
    Leq,
}

impl ComparisonOperator {
    pub fn keyword(&self) -> &'static str {
        match self {
            ComparisonOperator::Eq => "eq",
            ComparisonOperator::Neq => "neq",
            ComparisonOperator::Gt => "gt",
            ComparisonOperator::Geq => "geq",
            ComparisonOperator::Lt => "lt",
            ComparisonOperator::Leq => "leq",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "eq" => Some(ComparisonOperator::Eq),
            "neq" => Some(ComparisonOperator::Neq),
            "gt" => Some(ComparisonOperator::Gt),
            "geq" => Some(ComparisonOperator::Geq),
            "lt" => Some(ComparisonOperator::Lt),
            "leq" => Some(ComparisonOperator::Leq),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize)]
#[serde(untagged)]
pub enum Literal {
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Null,
}

/// Whether `s` can be written as a DSL string. The DSL has no escapes, so a
/// string may hold one kind of quote but not both.
pub fn is_quotable(s: &str) -> bool {
    !(s.contains('"') && s.contains('\''))
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    if s.contains('"') {
        write!(f, "'{}'", s)
    } else {
        write!(f, "\"{}\"", s)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(i) => write!(f, "{}", i),
            Literal::Float(x) => write!(f, "{:?}", x),
            Literal::String(s) => write_quoted(f, s),
            Literal::Boolean(b) => write!(f, "{}", b),
            Literal::Null => f.write_str("null"),
        }
    }
}

/// Arguments of a comparison: the (possibly dotted) field identifier and the
/// value it is compared against.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct ComparisonArgs {
    pub identifier: String,
    pub value: Literal,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct ComparisonNode {
    pub operator: ComparisonOperator,
    pub args: ComparisonArgs,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct LogicalNode {
    pub operator: LogicalOperator,
    pub constraints: Vec<PredicateNode>,
}

/// A parsed search predicate.
///
/// The JSON form carries a `type` tag of `logical` or `comparison`, matching
/// what [`PredicateNode::from_json`] accepts.
#[derive(Debug, PartialEq, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PredicateNode {
    Logical(LogicalNode),
    Comparison(ComparisonNode),
}

impl PredicateNode {
    pub fn logical(operator: LogicalOperator, constraints: Vec<PredicateNode>) -> Self {
        PredicateNode::Logical(LogicalNode {
            operator,
            constraints,
        })
    }

    pub fn comparison(
        operator: ComparisonOperator,
        identifier: impl Into<String>,
        value: Literal,
    ) -> Self {
        PredicateNode::Comparison(ComparisonNode {
            operator,
            args: ComparisonArgs {
                identifier: identifier.into(),
                value,
            },
        })
    }

    /// Every comparison identifier, in depth-first traversal order
    pub fn identifiers(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_identifiers(&mut out);
        out
    }

    fn collect_identifiers<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            PredicateNode::Logical(logical) => {
                for constraint in &logical.constraints {
                    constraint.collect_identifiers(out);
                }
            }
            PredicateNode::Comparison(comparison) => out.push(&comparison.args.identifier),
        }
    }
}

/// Renders the predicate as DSL text.
///
/// The output parses back to an equal node whenever every identifier and
/// string value passes [`is_quotable`] and every float is finite. Nodes from
/// [`PredicateNode::from_json`] and the DSL parser always satisfy this.
impl fmt::Display for PredicateNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredicateNode::Logical(logical) => {
                write!(f, "{}: {{ ", logical.operator.keyword())?;
                for (i, constraint) in logical.constraints.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", constraint)?;
                }
                f.write_str(" }")
            }
            PredicateNode::Comparison(comparison) => {
                write!(f, "{}: [", comparison.operator.keyword())?;
                write_quoted(f, &comparison.args.identifier)?;
                write!(f, ", {}]", comparison.args.value)
            }
        }
    }
}
