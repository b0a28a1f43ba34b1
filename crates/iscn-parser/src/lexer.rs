//! Lexical analyzer for karyotype strings.
//!
//! The lexer converts a karyotype string into a stream of [`Token`]s. Every
//! character produces a token, so lexing never fails: characters outside the
//! ISCN alphabet become [`Token::Symbol`] and are left for the parser to
//! reject.
//!
//! The public entry point is [`tokenize`].

use winnow::{
    Parser as _,
    combinator::alt,
    error::{ContextError, ErrMode},
    stream::{LocatingSlice, Location, Stream},
    token::{any, literal, one_of, take_while},
};

use crate::{
    span::Span,
    tokens::{PositionedToken, Token},
};

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = Result<O, ErrMode<ContextError>>;

/// Parse multi-character operators
fn multi_char_operator(input: &mut Input<'_>) -> IResult<Token> {
    alt((
        literal("->").value(Token::Arrow),
        literal("::").value(Token::DoubleColon),
    ))
    .parse_next(input)
}

/// Parse separators
fn separator(input: &mut Input<'_>) -> IResult<Token> {
    alt((
        ','.value(Token::Comma),
        ';'.value(Token::Semicolon),
        ':'.value(Token::Colon),
        '/'.value(Token::Slash),
        '.'.value(Token::Period),
    ))
    .parse_next(input)
}

/// Parse opening and closing brackets
fn bracket(input: &mut Input<'_>) -> IResult<Token> {
    alt((
        '('.value(Token::LeftParen),
        ')'.value(Token::RightParen),
        '['.value(Token::LeftBracket),
        ']'.value(Token::RightBracket),
        '<'.value(Token::LeftAngle),
        '>'.value(Token::RightAngle),
        '{'.value(Token::LeftBrace),
        '}'.value(Token::RightBrace),
    ))
    .parse_next(input)
}

/// Parse separators and brackets
fn punctuation(input: &mut Input<'_>) -> IResult<Token> {
    alt((separator, bracket)).parse_next(input)
}

/// Parse single character operators
fn operator(input: &mut Input<'_>) -> IResult<Token> {
    alt((
        '+'.value(Token::Plus),
        '-'.value(Token::Minus),
        '±'.value(Token::PlusMinus),
        '~'.value(Token::Approx),
        '?'.value(Token::Question),
        '×'.value(Token::Multiply),
    ))
    .parse_next(input)
}

fn digit(input: &mut Input<'_>) -> IResult<Token> {
    one_of(|c: char| c.is_ascii_digit())
        .map(Token::Digit)
        .parse_next(input)
}

fn letter(input: &mut Input<'_>) -> IResult<Token> {
    one_of(|c: char| c.is_ascii_alphabetic())
        .map(Token::Letter)
        .parse_next(input)
}

fn whitespace(input: &mut Input<'_>) -> IResult<Token> {
    take_while(1.., char::is_whitespace)
        .value(Token::Whitespace)
        .parse_next(input)
}

/// Any character the grammar has no name for
fn symbol(input: &mut Input<'_>) -> IResult<Token> {
    any.map(Token::Symbol).parse_next(input)
}

fn positioned_token(input: &mut Input<'_>) -> IResult<PositionedToken> {
    let start_pos = input.current_token_start();

    let token = alt((
        multi_char_operator, // Must come before single char operators
        digit,
        letter,
        punctuation,
        operator,
        whitespace,
        symbol,
    ))
    .parse_next(input)?;

    let end_pos = input.current_token_start();
    let span = Span::new(start_pos..end_pos);

    Ok(PositionedToken::new(token, span))
}

/// Split a karyotype string into positioned tokens.
///
/// Whitespace is kept as [`Token::Whitespace`] so that spans stay faithful
/// to the source; the parser skips it.
pub fn tokenize(source: &str) -> Vec<PositionedToken> {
    let mut input = LocatingSlice::new(source);
    let mut tokens = Vec::with_capacity(source.len());

    while !input.is_empty() {
        match positioned_token(&mut input) {
            Ok(token) => tokens.push(token),
            Err(_) => {
                // Unreachable in practice since `symbol` accepts any character
                input.next_token();
            }
        }
    }

    tokens
}
