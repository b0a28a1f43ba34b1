//! Error-tolerant parser for ISCN karyotype strings.
//!
//! [`parse`] turns a karyotype such as `46,XY,t(9;22)(q34;q11.2)` into a
//! [`Row`] and a list of [`Diagnostic`]s. Common authoring mistakes (missing
//! commas, extra slants, wrong brackets, missing gender) still produce a
//! tree; each one is reported as a warning anchored to its offset in the
//! original string. Only input that matches no row shape at all is rejected,
//! with a single error diagnostic spanning the whole string.
//!
//! ```
//! use iscn_parser::{ParseOptions, parse};
//!
//! let outcome = parse("46XX", &ParseOptions::default());
//! assert_eq!(outcome.row.to_string(), "46,XX");
//! assert_eq!(outcome.diagnostics[0].annotation(), "4|Missing a comma before 'XX'");
//! ```

pub mod error;
pub mod lexer;
pub mod tokens;
pub mod tree;
pub mod visit;

mod context;
mod parser;
mod span;

#[cfg(test)]
mod parser_tests;

pub use context::SexChromosomeSet;
pub use error::{Diagnostic, ErrorCode, ParseError, Severity};
pub use span::{Span, Spanned};
pub use tree::Row;
pub use visit::Visitor;

use log::{debug, info};

use tokens::Token;

/// Options controlling a parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Cache event results by position so that alternatives sharing a
    /// prefix do not re-parse it.
    pub memoize: bool,
    /// Inputs longer than this many bytes are rejected without parsing.
    pub max_input_length: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            memoize: true,
            max_input_length: 4096,
        }
    }
}

/// Result of parsing one karyotype string.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub row: Row,
    /// Diagnostics in the order they were produced.
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutcome {
    /// Returns `true` if the row was parsed without any diagnostic.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Returns `true` if the input matched no row shape.
    pub fn is_rejected(&self) -> bool {
        self.row.is_rejected()
    }

    /// Diagnostics in their compact `"<marker>|<message>"` form.
    pub fn annotations(&self) -> Vec<String> {
        self.diagnostics.iter().map(Diagnostic::annotation).collect()
    }
}

/// Parse a karyotype string.
///
/// Never fails: problems are reported through
/// [`ParseOutcome::diagnostics`].
pub fn parse(source: &str, options: &ParseOptions) -> ParseOutcome {
    info!(length = source.len(); "Parsing karyotype");

    if source.len() > options.max_input_length {
        debug!(
            length = source.len(),
            limit = options.max_input_length;
            "Input exceeds maximum length"
        );
        return oversized(source, options.max_input_length);
    }

    let tokens: Vec<_> = lexer::tokenize(source)
        .into_iter()
        .filter(|token| token.token != Token::Whitespace)
        .collect();
    debug!(tokens = tokens.len(); "Tokenized karyotype");

    let (row, diagnostics) = parser::Parser::new(source, &tokens, options.memoize).parse();
    debug!(
        diagnostics = diagnostics.len(),
        rejected = row.is_rejected();
        "Parsed karyotype"
    );
    ParseOutcome { row, diagnostics }
}

/// Parse a karyotype string, treating any diagnostic as an error.
///
/// # Errors
///
/// Returns a [`ParseError`] holding every diagnostic when the input was
/// rejected or needed any correction.
pub fn parse_strict(source: &str, options: &ParseOptions) -> Result<Row, ParseError> {
    let outcome = parse(source, options);
    if outcome.diagnostics.is_empty() {
        Ok(outcome.row)
    } else {
        Err(ParseError::new(outcome.diagnostics))
    }
}

fn oversized(source: &str, limit: usize) -> ParseOutcome {
    let span = Span::new(0..source.len());
    let diagnostic = Diagnostic::error("This is an incorrect input for karyotype parsing.")
        .with_code(ErrorCode::E203)
        .with_label(span, ErrorCode::E203.description())
        .with_help(format!(
            "input is {} bytes long, the limit is {limit}",
            source.len()
        ));
    ParseOutcome {
        row: Row::Rejected(Spanned::new(source.to_string(), span)),
        diagnostics: vec![diagnostic],
    }
}
