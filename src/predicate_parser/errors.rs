use nom::error::{ContextError, ErrorKind, ParseError};
use std::fmt;

/// Parse failure, as a stack of `(remaining input, context)` pairs.
///
/// The innermost failure comes first; each enclosing `context(..)` pushes
/// the construct that was being parsed when it happened.
#[derive(Debug, PartialEq)]
pub struct PredicateParsingError<'a> {
    pub errors: Vec<(&'a str, &'static str)>,
}

impl<'a> PredicateParsingError<'a> {
    pub fn new(input: &'a str, context: &'static str) -> Self {
        PredicateParsingError {
            errors: vec![(input, context)],
        }
    }

    /// Byte offset of the innermost failure within `source`, the text the
    /// parser was started on.
    pub fn offset_in(&self, source: &str) -> Option<usize> {
        self.errors
            .first()
            .map(|(rest, _)| source.len().saturating_sub(rest.len()))
    }
}

// Only the kinds the predicate combinators can produce get a message.
fn describe_kind(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Char => "Unexpected character",
        ErrorKind::Alpha | ErrorKind::AlphaNumeric => "Expected an operator keyword",
        ErrorKind::Digit | ErrorKind::Float => "Expected a number",
        ErrorKind::Tag => "Unexpected token",
        ErrorKind::TakeUntil => "Unterminated quoted string",
        ErrorKind::Alt => "No matching alternative",
        ErrorKind::SeparatedList => "Malformed constraint list",
        ErrorKind::Eof => "Unexpected end of input",
        _ => "Unable to parse",
    }
}

impl<'a> ParseError<&'a str> for PredicateParsingError<'a> {
    fn from_error_kind(input: &'a str, kind: ErrorKind) -> Self {
        PredicateParsingError::new(input, describe_kind(kind))
    }

    fn append(input: &'a str, kind: ErrorKind, mut other: Self) -> Self {
        other.errors.push((input, describe_kind(kind)));
        other
    }
}

impl<'a> ContextError<&'a str> for PredicateParsingError<'a> {
    fn add_context(input: &'a str, ctx: &'static str, mut other: Self) -> Self {
        other.errors.push((input, ctx));
        other
    }
}

impl fmt::Display for PredicateParsingError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (input, ctx) in &self.errors {
            let excerpt: String = input.trim_start().chars().take(40).collect();
            if excerpt.is_empty() {
                writeln!(f, "{}: <end of input>", ctx)?;
            } else {
                writeln!(f, "{}: {}", ctx, excerpt)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for PredicateParsingError<'_> {}

impl<'a> From<nom::error::Error<&'a str>> for PredicateParsingError<'a> {
    fn from(err: nom::error::Error<&'a str>) -> Self {
        PredicateParsingError::new(err.input, describe_kind(err.code))
    }
}
