//! Token definitions for karyotype strings.
//!
//! ISCN is lexed one character at a time: keywords such as `del` or `idem`
//! are sequences of [`Token::Letter`] tokens that the parser matches as
//! words. Only the two-character operators `->` and `::` are fused.

use std::fmt;

use crate::span::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// A decimal digit `0`–`9`.
    Digit(char),
    /// An ASCII letter.
    Letter(char),

    // Separators
    Comma,
    Semicolon,
    Colon,
    DoubleColon,
    Slash,
    Period,

    // Brackets
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftAngle,
    RightAngle,
    LeftBrace,
    RightBrace,

    // Operators
    Plus,
    Minus,
    PlusMinus,
    Approx,
    Question,
    Arrow,
    Multiply,

    Whitespace,
    /// Any other character.
    Symbol(char),
}

impl Token {
    /// Numeric value of a digit token.
    pub fn digit_value(&self) -> Option<u32> {
        match self {
            Token::Digit(c) => c.to_digit(10),
            _ => None,
        }
    }

    /// Returns `true` for `(`, `[`, `<` and `{`.
    pub fn is_opening_bracket(&self) -> bool {
        matches!(
            self,
            Token::LeftParen | Token::LeftBracket | Token::LeftAngle | Token::LeftBrace
        )
    }

    /// Returns `true` for `)`, `]`, `>` and `}`.
    pub fn is_closing_bracket(&self) -> bool {
        matches!(
            self,
            Token::RightParen | Token::RightBracket | Token::RightAngle | Token::RightBrace
        )
    }

    /// Returns `true` for punctuation that may appear between two clones.
    pub fn is_clone_punctuation(&self) -> bool {
        matches!(
            self,
            Token::Comma
                | Token::Semicolon
                | Token::Colon
                | Token::DoubleColon
                | Token::Slash
                | Token::Period
                | Token::Symbol(_)
        )
    }

    /// Returns `true` if the token is the given letter, ignoring case.
    pub fn is_letter_ignore_case(&self, expected: char) -> bool {
        matches!(self, Token::Letter(c) if c.eq_ignore_ascii_case(&expected))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Digit(c) | Token::Letter(c) | Token::Symbol(c) => write!(f, "{c}"),
            Token::Comma => write!(f, ","),
            Token::Semicolon => write!(f, ";"),
            Token::Colon => write!(f, ":"),
            Token::DoubleColon => write!(f, "::"),
            Token::Slash => write!(f, "/"),
            Token::Period => write!(f, "."),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::LeftBracket => write!(f, "["),
            Token::RightBracket => write!(f, "]"),
            Token::LeftAngle => write!(f, "<"),
            Token::RightAngle => write!(f, ">"),
            Token::LeftBrace => write!(f, "{{"),
            Token::RightBrace => write!(f, "}}"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::PlusMinus => write!(f, "±"),
            Token::Approx => write!(f, "~"),
            Token::Question => write!(f, "?"),
            Token::Arrow => write!(f, "->"),
            Token::Multiply => write!(f, "×"),
            Token::Whitespace => write!(f, " "),
        }
    }
}

/// A token paired with its location in the source string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionedToken {
    pub token: Token,
    pub span: Span,
}

impl PositionedToken {
    pub fn new(token: Token, span: Span) -> Self {
        Self { token, span }
    }
}

impl std::ops::Deref for PositionedToken {
    type Target = Token;

    fn deref(&self) -> &Self::Target {
        &self.token
    }
}

impl From<(Token, Span)> for PositionedToken {
    fn from((token, span): (Token, Span)) -> Self {
        Self::new(token, span)
    }
}

impl fmt::Display for PositionedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.token.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_display_round_trips_source_text() {
        let tokens = [
            (Token::Digit('4'), "4"),
            (Token::Letter('q'), "q"),
            (Token::DoubleColon, "::"),
            (Token::Arrow, "->"),
            (Token::LeftBrace, "{"),
            (Token::Multiply, "×"),
        ];
        for (token, text) in tokens {
            assert_eq!(token.to_string(), text);
        }
    }

    #[test]
    fn test_token_classification() {
        assert_eq!(Token::Digit('7').digit_value(), Some(7));
        assert_eq!(Token::Letter('x').digit_value(), None);
        assert!(Token::LeftAngle.is_opening_bracket());
        assert!(!Token::LeftAngle.is_closing_bracket());
        assert!(Token::RightBrace.is_closing_bracket());
        assert!(!Token::Comma.is_opening_bracket());
        assert!(Token::Semicolon.is_clone_punctuation());
        assert!(!Token::Plus.is_clone_punctuation());
        assert!(Token::Letter('x').is_letter_ignore_case('X'));
    }
}
