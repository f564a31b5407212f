use ast::PredicateNode;
use errors::PredicateParsingError;
use nom::IResult;

pub mod ast;
mod common;
pub mod errors;
mod expression;
pub mod json_node;

/// Parse a predicate node from the front of `input`, returning the remainder
pub fn parse_predicate_with_nom(
    input: &'_ str,
) -> IResult<&'_ str, PredicateNode, PredicateParsingError<'_>> {
    expression::parse_predicate_node(input)
}

/// Parse a complete predicate expression; trailing input is an error
pub fn parse_predicate(input: &'_ str) -> Result<PredicateNode, PredicateParsingError<'_>> {
    if input.trim().is_empty() {
        return Err(PredicateParsingError::new(input, "Empty predicate"));
    }

    match parse_predicate_with_nom(input) {
        Ok((remainder, node)) => {
            let trimmed = remainder.trim();
            if !trimmed.is_empty() {
                return Err(PredicateParsingError {
                    errors: vec![
                        (remainder, "Unexpected tokens after predicate"),
                        (trimmed, "Unparsed input"),
                    ],
                });
            }
            log::trace!("parsed predicate: {}", node);
            Ok(node)
        }
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(e),
        Err(nom::Err::Incomplete(_)) => Err(PredicateParsingError::new("", "Incomplete input")),
    }
}
