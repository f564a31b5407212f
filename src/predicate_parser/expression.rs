use nom::{
    character::complete::char,
    combinator::{cut, opt},
    error::context,
    multi::separated_list0,
    IResult, Parser,
};

use super::{
    ast::{ComparisonArgs, ComparisonOperator, Literal, LogicalOperator, PredicateNode},
    common::{self, ws},
    errors::PredicateParsingError,
};

fn lift<'a, O>(result: IResult<&'a str, O>) -> IResult<&'a str, O, PredicateParsingError<'a>> {
    result.map_err(|e| e.map(PredicateParsingError::from))
}

fn keyword(input: &'_ str) -> IResult<&'_ str, &'_ str, PredicateParsingError<'_>> {
    lift(common::parse_keyword(input))
}

fn quoted_string(input: &'_ str) -> IResult<&'_ str, &'_ str, PredicateParsingError<'_>> {
    lift(common::parse_quoted_string(input))
}

/// Parse one predicate node: either `match_all: { ... }` / `match_any: { ... }`
/// or a comparison such as `geq: ["salaries.salary", 60000]`.
pub fn parse_predicate_node(
    input: &'_ str,
) -> IResult<&'_ str, PredicateNode, PredicateParsingError<'_>> {
    let (rest, word) = ws(keyword).parse(input)?;
    let (rest, _) = context("Expected ':' after operator", cut(ws(char(':')))).parse(rest)?;

    if let Some(operator) = LogicalOperator::from_keyword(word) {
        let (rest, constraints) = cut(parse_constraint_block).parse(rest)?;
        return Ok((rest, PredicateNode::logical(operator, constraints)));
    }

    if let Some(operator) = ComparisonOperator::from_keyword(word) {
        let (rest, args) = cut(parse_comparison_args).parse(rest)?;
        return Ok((
            rest,
            PredicateNode::comparison(operator, args.identifier, args.value),
        ));
    }

    Err(nom::Err::Failure(PredicateParsingError::new(
        input,
        "Unknown predicate operator",
    )))
}

// `{ node, node, ... }`; a trailing comma is tolerated and the list may be empty.
fn parse_constraint_block(
    input: &'_ str,
) -> IResult<&'_ str, Vec<PredicateNode>, PredicateParsingError<'_>> {
    let (input, _) = context("Expected '{' to open constraint list", ws(char('{'))).parse(input)?;
    let (input, constraints) =
        separated_list0(ws(char(',')), parse_predicate_node).parse(input)?;
    let (input, _) = if constraints.is_empty() {
        (input, None)
    } else {
        opt(ws(char(','))).parse(input)?
    };
    let (input, _) =
        context("Expected ',' or '}' in constraint list", ws(char('}'))).parse(input)?;
    Ok((input, constraints))
}

// `["identifier", value]`
fn parse_comparison_args(
    input: &'_ str,
) -> IResult<&'_ str, ComparisonArgs, PredicateParsingError<'_>> {
    let (input, _) = context(
        "Expected '[' to open comparison arguments",
        ws(char('[')),
    )
    .parse(input)?;
    let (input, identifier) =
        context("Expected a quoted field identifier", ws(quoted_string)).parse(input)?;
    let (input, _) = context(
        "Expected ',' between identifier and value",
        ws(char(',')),
    )
    .parse(input)?;
    let (input, value) = context("Expected a literal value", ws(parse_literal)).parse(input)?;
    let (input, _) = context(
        "Expected ']' to close comparison arguments",
        ws(char(']')),
    )
    .parse(input)?;

    Ok((
        input,
        ComparisonArgs {
            identifier: identifier.to_string(),
            value,
        },
    ))
}

pub fn parse_literal(input: &'_ str) -> IResult<&'_ str, Literal, PredicateParsingError<'_>> {
    if let Ok((rest, s)) = common::parse_quoted_string(input) {
        return Ok((rest, Literal::String(s.to_string())));
    }

    if let Ok((rest, number)) = common::parse_numeric_literal(input) {
        if let Ok(i) = number.parse::<i64>() {
            return Ok((rest, Literal::Integer(i)));
        }
        if let Ok(f) = number.parse::<f64>() {
            if !f.is_finite() {
                return Err(nom::Err::Failure(PredicateParsingError::new(
                    input,
                    "Numeric literal out of range",
                )));
            }
            return Ok((rest, Literal::Float(f)));
        }
        return Err(nom::Err::Error(PredicateParsingError::new(
            input,
            "Invalid numeric literal",
        )));
    }

    let (rest, word) = keyword(input)?;
    if word.eq_ignore_ascii_case("null") {
        Ok((rest, Literal::Null))
    } else if word.eq_ignore_ascii_case("true") {
        Ok((rest, Literal::Boolean(true)))
    } else if word.eq_ignore_ascii_case("false") {
        Ok((rest, Literal::Boolean(false)))
    } else {
        Err(nom::Err::Error(PredicateParsingError::new(
            input,
            "Bare words are not values; quote strings",
        )))
    }
}
