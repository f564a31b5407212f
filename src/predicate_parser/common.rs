use nom::{
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{alpha1, alphanumeric1, digit1, multispace0},
    combinator::{opt, recognize},
    error::ParseError,
    multi::many0,
    sequence::{delimited, pair},
    IResult, Parser,
};

use nom::character::complete::char;

pub fn ws<'a, O, E: ParseError<&'a str>, F>(inner: F) -> impl Parser<&'a str, Output = O, Error = E>
where
    F: Parser<&'a str, Output = O, Error = E>,
{
    delimited(multispace0, inner, multispace0)
}

// Operator keywords: a letter followed by letters/digits, optionally joined by underscores.
// e.g. "eq", "geq", "match_all".
pub fn parse_keyword(input: &str) -> IResult<&str, &str> {
    recognize(pair(alpha1, many0(pair(tag("_"), alphanumeric1)))).parse(input)
}

/// Parse a numeric literal (integer or float)
/// Matches: 123, -123, 3.14, -3.14, .5, -.5, 1e6
pub fn parse_numeric_literal(input: &str) -> IResult<&str, &str> {
    recognize((
        opt(alt((char('-'), char('+')))),
        alt((
            // Float with integer part: 123.456 (must have digits after dot)
            recognize((digit1, char('.'), digit1)),
            // Float without integer part: .456
            recognize(pair(char('.'), digit1)),
            // Integer: 123 (no dot allowed - checked after float patterns)
            digit1,
        )),
        opt(recognize((
            alt((char('e'), char('E'))),
            opt(alt((char('-'), char('+')))),
            digit1,
        ))),
    ))
    .parse(input)
}

/// Contents of a single- or double-quoted string, without the quotes.
/// No escape sequences: the string ends at the first matching quote.
pub fn parse_quoted_string(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('"'), take_while(|c| c != '"'), char('"')),
        delimited(char('\''), take_while(|c| c != '\''), char('\'')),
    ))
    .parse(input)
}
