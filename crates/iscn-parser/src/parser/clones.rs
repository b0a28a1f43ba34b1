//! Rows and the separators between their clones.

use log::{debug, trace};
use winnow::stream::Stream;

use iscn_core::semantic::CloneRole;

use super::{IResult, Parser};
use crate::{
    error::{Diagnostic, ErrorCode},
    span::{Span, Spanned},
    tokens::Token,
    tree::{CloneSeparator, CloneSequence, KaryotypeBody, KaryotypeClone, Row},
};

type BodyParser<'t> = fn(&mut Parser<'t>) -> IResult<Spanned<KaryotypeBody>>;

const REJECTION_MESSAGE: &str = "This is an incorrect input for karyotype parsing.";

impl<'t> Parser<'t> {
    /// Parse the whole input as a row. Never fails: input that matches no
    /// row shape becomes [`Row::Rejected`] with a single error diagnostic.
    pub(super) fn row(&mut self) -> Row {
        if let Ok(sequence) = self.attempt(Self::clone_sequence) {
            debug!(clones = sequence.clones.len(); "Parsed clone sequence");
            return Row::Sequence(sequence);
        }
        if let Ok(lineage) = self.attempt(Self::clone_lineage) {
            debug!(clones = lineage.clones.len(); "Parsed stemline and sidelines");
            return Row::Lineage(lineage);
        }
        self.rejected_row()
    }

    /// First clone followed by `idem` or independent clones.
    fn clone_sequence(&mut self) -> IResult<CloneSequence> {
        let mut clones = vec![self.first_clone(CloneRole::First, Self::standard_body)?];
        while let Some(previous) = clones.last().map(Spanned::span) {
            let next = self
                .attempt(|p| p.following_clone(previous, CloneRole::Idem, Self::idem_body))
                .or_else(|_| {
                    self.attempt(|p| {
                        p.following_clone(previous, CloneRole::Independent, Self::standard_body)
                    })
                });
            match next {
                Ok(clone) => clones.push(clone),
                Err(_) => break,
            }
        }
        self.finish_row(clones)
    }

    /// Stemline followed by clones of which at least one is a sideline.
    fn clone_lineage(&mut self) -> IResult<CloneSequence> {
        let mut clones = vec![self.first_clone(CloneRole::Stemline, Self::stemline_body)?];
        while let Some(previous) = clones.last().map(Spanned::span) {
            let next = self
                .attempt(|p| p.following_clone(previous, CloneRole::Sideline, Self::sl_body))
                .or_else(|_| {
                    self.attempt(|p| p.following_clone(previous, CloneRole::Sideline, Self::sdl_body))
                })
                .or_else(|_| {
                    self.attempt(|p| {
                        p.following_clone(previous, CloneRole::Independent, Self::standard_body)
                    })
                });
            match next {
                Ok(clone) => clones.push(clone),
                Err(_) => break,
            }
        }
        if !clones.iter().any(|clone| clone.role == CloneRole::Sideline) {
            return self.backtrack("sideline clone");
        }
        self.finish_row(clones)
    }

    /// Optional `.` and the end of input.
    fn finish_row(&mut self, clones: Vec<Spanned<KaryotypeClone>>) -> IResult<CloneSequence> {
        let terminated = self
            .optional(|p| p.expect(Token::Period, "'.'"))
            .is_some();
        if !self.at_end() {
            self.record_failure("'/'");
            return self.backtrack("end of input");
        }
        Ok(CloneSequence { clones, terminated })
    }

    fn first_clone(
        &mut self,
        role: CloneRole,
        body: BodyParser<'t>,
    ) -> IResult<Spanned<KaryotypeClone>> {
        let start = self.position();
        let ordinal = self.ctx.begin_clone();
        trace!(ordinal, role:?; "Entering clone");
        let body = body(self)?;
        Ok(self.finish_clone(start, ordinal, role, None, body))
    }

    /// A clone after the first, with its separator in one of four shapes.
    ///
    /// Separator warnings carry a secondary label on `previous`, the clone
    /// the separator should have closed.
    fn following_clone(
        &mut self,
        previous: Span,
        role: CloneRole,
        body: BodyParser<'t>,
    ) -> IResult<Spanned<KaryotypeClone>> {
        self.attempt(|p| p.slant_separated(role, body))
            .or_else(|_| self.attempt(|p| p.unseparated(previous, role, body)))
            .or_else(|_| self.attempt(|p| p.slant_run_separated(previous, role, body)))
            .or_else(|_| self.attempt(|p| p.punctuation_separated(previous, role, body)))
    }

    fn warn_separator(
        &mut self,
        mark: usize,
        code: ErrorCode,
        message: String,
        span: Span,
        previous: Span,
    ) {
        let diagnostic =
            Self::warning(code, message, span).with_secondary_label(previous, "previous clone");
        self.diagnostics.emit_at(mark, diagnostic);
    }

    /// `/46,XY`
    fn slant_separated(
        &mut self,
        role: CloneRole,
        body: BodyParser<'t>,
    ) -> IResult<Spanned<KaryotypeClone>> {
        let start = self.position();
        let slant = self.expect(Token::Slash, "'/'")?;
        let ordinal = self.ctx.begin_clone();
        trace!(ordinal, role:?; "Entering clone");
        let body = body(self)?;
        let separator = Spanned::new(CloneSeparator::Slant, slant);
        Ok(self.finish_clone(start, ordinal, role, Some(separator), body))
    }

    /// `46,XX46,XY`
    fn unseparated(
        &mut self,
        previous: Span,
        role: CloneRole,
        body: BodyParser<'t>,
    ) -> IResult<Spanned<KaryotypeClone>> {
        let start = self.position();
        let separator_span = self.span_from(start);
        let ordinal = self.ctx.begin_clone();
        let mark = self.diagnostics.len();
        let body = body(self)?;
        self.warn_separator(
            mark,
            ErrorCode::E200,
            format!(
                "Missing '/' before clone # {ordinal} '{}'",
                self.text(body.span())
            ),
            body.span(),
            previous,
        );
        let separator = Spanned::new(CloneSeparator::Missing, separator_span);
        Ok(self.finish_clone(start, ordinal, role, Some(separator), body))
    }

    /// `46,XX//46,XY`
    fn slant_run_separated(
        &mut self,
        previous: Span,
        role: CloneRole,
        body: BodyParser<'t>,
    ) -> IResult<Spanned<KaryotypeClone>> {
        let start = self.position();
        let mut slants = 0;
        while self.peek() == Some(Token::Slash) {
            self.expect(Token::Slash, "'/'")?;
            slants += 1;
        }
        if slants < 2 {
            return self.backtrack("'/'");
        }
        let separator_span = self.span_from(start);

        let ordinal = self.ctx.begin_clone();
        let mark = self.diagnostics.len();
        let body = body(self)?;
        let span = self.span_from(start);
        self.warn_separator(
            mark,
            ErrorCode::E201,
            format!(
                "Too many '/' before clone # {ordinal} '{}'",
                self.text(span)
            ),
            span,
            previous,
        );
        let separator = Spanned::new(CloneSeparator::TooMany(slants), separator_span);
        Ok(self.finish_clone(start, ordinal, role, Some(separator), body))
    }

    /// `46,XX;46,XY`
    fn punctuation_separated(
        &mut self,
        previous: Span,
        role: CloneRole,
        body: BodyParser<'t>,
    ) -> IResult<Spanned<KaryotypeClone>> {
        let start = self.position();
        let mut only_slants = true;
        while self.peek().as_ref().is_some_and(Token::is_clone_punctuation) {
            let token = self.next_if("clone separator", Token::is_clone_punctuation)?;
            only_slants &= token.token == Token::Slash;
        }
        let separator_span = self.span_from(start);
        if separator_span.is_empty() || only_slants {
            return self.backtrack("'/'");
        }
        let separator_text = self.text(separator_span);

        let ordinal = self.ctx.begin_clone();
        let mark = self.diagnostics.len();
        let body = body(self)?;
        let span = self.span_from(start);
        self.warn_separator(
            mark,
            ErrorCode::E202,
            format!(
                "Incorrect clone separation '{separator_text}' before clone # {ordinal}, expecting '/'"
            ),
            span,
            previous,
        );
        let separator = Spanned::new(
            CloneSeparator::Other(separator_text.to_string()),
            separator_span,
        );
        Ok(self.finish_clone(start, ordinal, role, Some(separator), body))
    }

    fn finish_clone(
        &self,
        start: usize,
        ordinal: usize,
        role: CloneRole,
        separator: Option<Spanned<CloneSeparator>>,
        body: Spanned<KaryotypeBody>,
    ) -> Spanned<KaryotypeClone> {
        let clone = KaryotypeClone {
            ordinal,
            role,
            separator,
            body,
            sex_chromosomes: self.ctx.sex_chromosomes().clone(),
        };
        self.spanned(start, clone)
    }

    /// Give up on the input: one error spanning the whole string.
    fn rejected_row(&mut self) -> Row {
        let span = Span::new(0..self.source.len());
        let help = self.failure_help();
        debug!(help:?; "Rejecting karyotype");

        let mut diagnostic = Diagnostic::error(REJECTION_MESSAGE)
            .with_code(ErrorCode::E203)
            .with_label(span, ErrorCode::E203.description());
        if let Some(help) = help {
            diagnostic = diagnostic.with_help(help);
        }
        self.diagnostics.emit(diagnostic);

        let remaining = self.input.eof_offset();
        let _ = self.input.next_slice(remaining);
        Row::Rejected(Spanned::new(self.source.to_string(), span))
    }
}
