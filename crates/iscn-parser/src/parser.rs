//! Parser for karyotype tokens.
//!
//! This module turns the token stream produced by the [`lexer`](crate::lexer)
//! into a [`Row`] defined in [`tree`](crate::tree), collecting diagnostics on
//! the way.
//!
//! The grammar is written as ordered alternatives: every rule tries its
//! correct shape first and then a fixed list of incorrect shapes, each of
//! which still builds a node but records a tailored warning. An alternative
//! that fails is rolled back completely (cursor, diagnostics and
//! [`ParseContext`]) before the next one is tried, so a rejected reading never
//! leaves traces.
//!
//! Winnow supplies the token stream and its checkpoints, but alternatives are
//! written with `Parser::attempt` and `Parser::optional` rather than
//! `alt`, `opt` or `repeat`. Those combinators only reset the stream, while
//! a failed branch here must also drop the warnings it emitted and the sex
//! chromosomes it noted.
//!
//! Rules are grouped by grammar layer:
//!
//! - [`primitives`]: integers, ranges, chromosomes, breakpoints
//! - [`lists`]: the generic bracketed list and its error shapes
//! - [`events`]: numerical changes, aberrations, markers
//! - [`body`]: the five karyotype body variants
//! - [`clones`]: clone separators and row shapes

mod body;
mod clones;
mod events;
mod lists;
mod primitives;

use std::collections::HashMap;

use log::trace;
use winnow::{
    Parser as _,
    error::{ContextError, ErrMode},
    stream::{Stream, TokenSlice},
    token::any,
};

use iscn_core::chromosome::SexChromosome;

use crate::{
    context::ParseContext,
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    span::{Span, Spanned},
    tokens::{PositionedToken, Token},
    tree::{RegEvent, Row},
};

use lists::Boundary;

/// Context type for parser errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Context {
    /// Description of what was expected when the failure happened
    Label(&'static str),
}

type Input<'t> = TokenSlice<'t, PositionedToken>;
type Checkpoint<'t> = <Input<'t> as Stream>::Checkpoint;
pub(crate) type IResult<O> = std::result::Result<O, ErrMode<ContextError<Context>>>;

/// Cached outcome of parsing an event at one token index.
struct MemoEntry<'t> {
    event: Spanned<RegEvent>,
    end: Checkpoint<'t>,
    diagnostics: Vec<Diagnostic>,
    noted: Vec<SexChromosome>,
}

/// Recursive-descent parser state for a single karyotype string.
pub(crate) struct Parser<'t> {
    source: &'t str,
    tokens: &'t [PositionedToken],
    input: Input<'t>,
    ctx: ParseContext,
    diagnostics: DiagnosticCollector,
    /// Events keyed by starting token index; `None` records a failure.
    memo: Option<HashMap<usize, Option<MemoEntry<'t>>>>,
    /// Furthest token index at which a token was rejected, and what was
    /// expected there.
    furthest_failure: Option<(usize, &'static str)>,
}

impl<'t> Parser<'t> {
    /// Create a parser over `tokens`, which must not contain whitespace.
    pub fn new(source: &'t str, tokens: &'t [PositionedToken], memoize: bool) -> Self {
        Self {
            source,
            tokens,
            input: TokenSlice::new(tokens),
            ctx: ParseContext::new(),
            diagnostics: DiagnosticCollector::new(),
            memo: memoize.then(HashMap::new),
            furthest_failure: None,
        }
    }

    /// Parse the whole input and return the row with its diagnostics.
    pub fn parse(mut self) -> (Row, Vec<Diagnostic>) {
        let row = self.row();
        (row, self.diagnostics.into_diagnostics())
    }

    // ------------------------------------------------------------------
    // Cursor
    // ------------------------------------------------------------------

    /// Index of the next token.
    fn position(&self) -> usize {
        self.tokens.len() - self.input.eof_offset()
    }

    fn peek(&self) -> Option<Token> {
        self.peek_nth(0)
    }

    fn peek_nth(&self, n: usize) -> Option<Token> {
        self.tokens.get(self.position() + n).map(|t| t.token)
    }

    fn at_end(&self) -> bool {
        self.input.eof_offset() == 0
    }

    /// Span covering the tokens consumed since `start`.
    ///
    /// Nothing consumed gives an empty span at the next token.
    fn span_from(&self, start: usize) -> Span {
        let end = self.position();
        match (self.tokens.get(start), end.checked_sub(1).and_then(|i| self.tokens.get(i))) {
            (Some(first), Some(last)) if end > start => first.span.union(last.span),
            (Some(next), _) => Span::new(next.span.start()..next.span.start()),
            (None, _) => Span::new(self.source.len()..self.source.len()),
        }
    }

    /// Source text covered by `span`.
    fn text(&self, span: Span) -> &'t str {
        span.text(self.source)
    }

    fn spanned<T>(&self, start: usize, value: T) -> Spanned<T> {
        Spanned::new(value, self.span_from(start))
    }

    // ------------------------------------------------------------------
    // Failure and rollback
    // ------------------------------------------------------------------

    fn backtrack<T>(&self, label: &'static str) -> IResult<T> {
        let mut e = ContextError::new();
        e.push(Context::Label(label));
        Err(ErrMode::Backtrack(e))
    }

    fn record_failure(&mut self, label: &'static str) {
        let position = self.position();
        match self.furthest_failure {
            Some((furthest, _)) if furthest > position => {}
            _ => self.furthest_failure = Some((position, label)),
        }
    }

    /// Run `f`; if it fails, undo its effects on the cursor, diagnostics
    /// and context.
    fn attempt<T>(&mut self, f: impl FnOnce(&mut Self) -> IResult<T>) -> IResult<T> {
        let checkpoint = self.input.checkpoint();
        let diagnostics = self.diagnostics.len();
        let snapshot = self.ctx.snapshot();

        let result = f(self);
        if result.is_err() {
            self.input.reset(&checkpoint);
            self.diagnostics.truncate(diagnostics);
            self.ctx.restore(snapshot);
        }
        result
    }

    /// Run `f` as an optional part: `None` when it fails.
    fn optional<T>(&mut self, f: impl FnOnce(&mut Self) -> IResult<T>) -> Option<T> {
        self.attempt(f).ok()
    }

    /// Returns `true` if `f` would succeed here; never consumes input.
    fn lookahead<T>(&mut self, f: impl FnOnce(&mut Self) -> IResult<T>) -> bool {
        let checkpoint = self.input.checkpoint();
        let diagnostics = self.diagnostics.len();
        let snapshot = self.ctx.snapshot();

        let matched = f(self).is_ok();
        self.input.reset(&checkpoint);
        self.diagnostics.truncate(diagnostics);
        self.ctx.restore(snapshot);
        matched
    }

    // ------------------------------------------------------------------
    // Tokens
    // ------------------------------------------------------------------

    /// Consume the next token if it satisfies `predicate`.
    fn next_if(
        &mut self,
        label: &'static str,
        predicate: impl Fn(&Token) -> bool,
    ) -> IResult<&'t PositionedToken> {
        let result = any
            .verify(|token: &PositionedToken| predicate(&token.token))
            .context(Context::Label(label))
            .parse_next(&mut self.input);
        if result.is_err() {
            self.record_failure(label);
        }
        result
    }

    fn expect(&mut self, expected: Token, label: &'static str) -> IResult<Span> {
        self.next_if(label, |token| *token == expected)
            .map(|token| token.span)
    }

    /// Consume a lower-case word spelled with letter tokens.
    fn keyword(&mut self, word: &'static str) -> IResult<Span> {
        let start = self.position();
        self.attempt(|p| {
            for expected in word.chars() {
                p.next_if(word, |token| *token == Token::Letter(expected))?;
            }
            Ok(p.span_from(start))
        })
    }

    /// Consume the `/or/` (or bare `or`) separator of alternative readings.
    fn or_separator(&mut self) -> IResult<()> {
        self.attempt(|p| {
            p.expect(Token::Slash, "'/or/'")?;
            p.keyword("or")?;
            p.expect(Token::Slash, "'/or/'")?;
            Ok(())
        })
        .or_else(|_| self.keyword("or").map(|_| ()))
    }

    /// Returns `true` if the next token can end a list whose closing
    /// bracket is missing.
    fn at_list_boundary(&mut self, boundary: Boundary) -> bool {
        let next = self.peek();
        let ends_event = matches!(
            next,
            None | Some(
                Token::Comma
                    | Token::Slash
                    | Token::Period
                    | Token::LeftParen
                    | Token::LeftBracket
                    | Token::LeftAngle
            )
        );
        match boundary {
            Boundary::Event => ends_event,
            Boundary::Rearrangement => ends_event || self.lookahead(Self::rearrangement),
            Boundary::Clone => matches!(next, None | Some(Token::Slash | Token::Period)),
        }
    }

    // ------------------------------------------------------------------
    // Diagnostics
    // ------------------------------------------------------------------

    fn warning(code: ErrorCode, message: String, span: Span) -> Diagnostic {
        Diagnostic::warning(message)
            .with_code(code)
            .with_label(span, code.description())
    }

    fn warn(&mut self, code: ErrorCode, message: String, span: Span) {
        self.diagnostics.emit(Self::warning(code, message, span));
    }

    /// Emit a warning ahead of the diagnostics collected since `mark`, so
    /// that an outer rule's warning precedes its children's.
    fn warn_at(&mut self, mark: usize, code: ErrorCode, message: String, span: Span) {
        self.diagnostics
            .emit_at(mark, Self::warning(code, message, span));
    }

    /// Help text describing where parsing got stuck.
    fn failure_help(&self) -> Option<String> {
        let (index, label) = self.furthest_failure?;
        Some(match self.tokens.get(index) {
            Some(token) => format!(
                "expected {label} at offset {}, found '{}'",
                token.span.start(),
                token.token
            ),
            None => format!("expected {label} at end of input"),
        })
    }

    // ------------------------------------------------------------------
    // Memoization
    // ------------------------------------------------------------------

    /// Parse an event at the cursor, reusing an earlier result for the same
    /// position when memoization is enabled.
    fn memoized_reg_event(&mut self) -> IResult<Spanned<RegEvent>> {
        let start = self.position();

        if let Some(entry) = self.memo.as_ref().and_then(|memo| memo.get(&start)) {
            trace!(position = start, success = entry.is_some(); "Reusing memoized event");
            return match entry {
                Some(entry) => {
                    let event = entry.event.clone();
                    let diagnostics = entry.diagnostics.clone();
                    let noted = entry.noted.clone();
                    self.input.reset(&entry.end);
                    self.diagnostics.extend(diagnostics);
                    for sex in noted {
                        self.ctx.note_sex_chromosome(sex);
                    }
                    Ok(event)
                }
                None => self.backtrack("event"),
            };
        }

        let diagnostics = self.diagnostics.len();
        let noted = self.ctx.noted_len();
        let result = self.attempt(Self::reg_event);

        if self.memo.is_some() {
            let entry = result.as_ref().ok().map(|event| MemoEntry {
                event: event.clone(),
                end: self.input.checkpoint(),
                diagnostics: self.diagnostics.since(diagnostics).to_vec(),
                noted: self.ctx.noted_since(noted).to_vec(),
            });
            if let Some(memo) = self.memo.as_mut() {
                memo.insert(start, entry);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn significant(source: &str) -> Vec<PositionedToken> {
        tokenize(source)
            .into_iter()
            .filter(|t| t.token != Token::Whitespace)
            .collect()
    }

    #[test]
    fn test_attempt_rolls_back_on_failure() {
        let source = "46,XX";
        let tokens = significant(source);
        let mut parser = Parser::new(source, &tokens, true);

        let result: IResult<()> = parser.attempt(|p| {
            p.expect(Token::Digit('4'), "digit")?;
            p.warn(ErrorCode::E300, "temporary".to_string(), Span::new(0..1));
            p.ctx.begin_clone();
            p.expect(Token::Comma, "comma")?;
            Ok(())
        });

        assert!(result.is_err());
        assert_eq!(parser.position(), 0);
        assert_eq!(parser.diagnostics.len(), 0);
        assert_eq!(parser.ctx.clone_ordinal(), 0);
    }

    #[test]
    fn test_keyword_is_atomic() {
        let source = "ider";
        let tokens = significant(source);
        let mut parser = Parser::new(source, &tokens, false);

        assert!(parser.keyword("idem").is_err());
        assert_eq!(parser.position(), 0);
        assert!(parser.keyword("ider").is_ok());
        assert!(parser.at_end());
    }

    #[test]
    fn test_span_from_covers_consumed_tokens() {
        let source = "mos 45,X";
        let tokens = significant(source);
        let mut parser = Parser::new(source, &tokens, false);

        let start = parser.position();
        parser.keyword("mos").unwrap();
        assert_eq!(parser.span_from(start), Span::new(0..3));

        let start = parser.position();
        assert_eq!(parser.span_from(start), Span::new(4..4));
    }

    #[test]
    fn test_or_separator_forms() {
        let source = "/or/or";
        let tokens = significant(source);
        let mut parser = Parser::new(source, &tokens, false);

        assert!(parser.or_separator().is_ok());
        assert!(parser.or_separator().is_ok());
        assert!(parser.at_end());
    }

    #[test]
    fn test_failure_help_names_furthest_expectation() {
        let source = "46;";
        let tokens = significant(source);
        let mut parser = Parser::new(source, &tokens, false);

        parser.expect(Token::Digit('4'), "digit").unwrap();
        parser.expect(Token::Digit('6'), "digit").unwrap();
        assert!(parser.expect(Token::Comma, "','").is_err());
        assert_eq!(
            parser.failure_help().as_deref(),
            Some("expected ',' at offset 2, found ';'")
        );
    }
}
