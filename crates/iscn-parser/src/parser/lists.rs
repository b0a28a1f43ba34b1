//! Bracketed lists.
//!
//! Every list in a karyotype (chromosomes, breakpoints, the uncertain
//! chromosome of an aberration, the modal number and the cell count) goes
//! through [`Parser::bracketed_list`]. It tries the correct shape first and
//! then, in a fixed order, a missing opening bracket, a missing closing
//! bracket, missing brackets and wrong bracket characters. Element runs
//! separated by `,` or `:` instead of `;` are accepted with a warning.

use super::{IResult, Parser};
use crate::{
    error::ErrorCode,
    span::Spanned,
    tokens::Token,
    tree::{
        BracketShape, BracketedList, BreakpointGroup, DetailedEntry, ListElement, Segment,
        SeparatorShape, UncertainChromosome,
    },
};

/// What may follow a list whose closing bracket is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Boundary {
    /// `,`, `/`, `.`, an opening bracket or the end of input.
    Event,
    /// Anything [`Boundary::Event`] allows, or the start of a rearrangement.
    Rearrangement,
    /// `/`, `.` or the end of input.
    Clone,
}

/// Describes one kind of bracketed list.
#[derive(Debug, Clone, Copy)]
pub(super) struct ListKind {
    /// Name used in diagnostics, e.g. `chromosome list`.
    pub label: &'static str,
    pub open: Token,
    pub close: Token,
    /// The list holds exactly one element with no separators.
    pub single: bool,
    pub boundary: Boundary,
}

impl ListKind {
    const fn parenthesized(label: &'static str) -> Self {
        Self {
            label,
            open: Token::LeftParen,
            close: Token::RightParen,
            single: false,
            boundary: Boundary::Event,
        }
    }

    const fn derivative(label: &'static str) -> Self {
        Self {
            boundary: Boundary::Rearrangement,
            ..Self::parenthesized(label)
        }
    }

    fn brackets(&self) -> String {
        format!("{}{}", self.open, self.close)
    }
}

pub(super) const CHROMOSOME_LIST: ListKind = ListKind::parenthesized("chromosome list");
pub(super) const BREAKPOINTS_LIST: ListKind = ListKind::parenthesized("breakpoints list");
pub(super) const DERIVATIVE_CHROMOSOME_LIST: ListKind =
    ListKind::derivative("derivative chromosome list");
pub(super) const DERIVATIVE_BREAKPOINTS_LIST: ListKind =
    ListKind::derivative("derivative breakpoints list");
pub(super) const DETAILED_BREAKPOINTS_LIST: ListKind =
    ListKind::parenthesized("detailed breakpoints list");
pub(super) const UNCERTAIN_CHROMOSOME: ListKind = ListKind {
    label: "uncertain chromosome",
    open: Token::LeftParen,
    close: Token::RightParen,
    single: true,
    boundary: Boundary::Event,
};
pub(super) const MODAL_NUMBER: ListKind = ListKind {
    label: "modal number",
    open: Token::LeftAngle,
    close: Token::RightAngle,
    single: true,
    boundary: Boundary::Event,
};
/// A bare number is only a cell count at the end of a clone, so that
/// `46,XX47,XY` keeps `47` as the count of a second clone.
pub(super) const CELL_COUNT: ListKind = ListKind {
    label: "cell count",
    open: Token::LeftBracket,
    close: Token::RightBracket,
    single: true,
    boundary: Boundary::Clone,
};

/// Parser for one list element.
pub(super) type ElementParser<'t, E> = fn(&mut Parser<'t>) -> IResult<E>;

/// Elements of a list together with how they were separated.
struct ElementRun<E> {
    elements: Vec<ListElement<E>>,
    separators: SeparatorShape,
}

impl<'t> Parser<'t> {
    /// Parse a list of `kind`, trying the correct shape and then each
    /// malformed shape in turn.
    pub(super) fn bracketed_list<E>(
        &mut self,
        kind: ListKind,
        element: ElementParser<'t, E>,
    ) -> IResult<Spanned<BracketedList<E>>> {
        self.attempt(|p| p.list_correct(kind, element))
            .or_else(|_| self.attempt(|p| p.list_missing_open(kind, element)))
            .or_else(|_| self.attempt(|p| p.list_missing_close(kind, element)))
            .or_else(|_| self.attempt(|p| p.list_missing_both(kind, element)))
            .or_else(|_| self.attempt(|p| p.list_wrong_brackets(kind, element)))
    }

    /// Parse a single-element list and return the element with the shape of
    /// its brackets.
    pub(super) fn bracketed_value<E>(
        &mut self,
        kind: ListKind,
        element: ElementParser<'t, E>,
    ) -> IResult<Spanned<(E, BracketShape)>> {
        let list = self.bracketed_list(kind, element)?;
        let span = list.span();
        let BracketedList {
            brackets, elements, ..
        } = list.into_inner();
        match elements.into_iter().next() {
            Some(ListElement::Single(value)) => Ok(Spanned::new((value, brackets), span)),
            _ => self.backtrack(kind.label),
        }
    }

    fn list_correct<E>(
        &mut self,
        kind: ListKind,
        element: ElementParser<'t, E>,
    ) -> IResult<Spanned<BracketedList<E>>> {
        let start = self.position();
        self.expect(kind.open, kind.label)?;
        let run = self.element_run(kind, element)?;
        self.expect(kind.close, kind.label)?;
        Ok(self.spanned(start, run.into_list(BracketShape::Correct)))
    }

    fn list_missing_open<E>(
        &mut self,
        kind: ListKind,
        element: ElementParser<'t, E>,
    ) -> IResult<Spanned<BracketedList<E>>> {
        let start = self.position();
        let mark = self.diagnostics.len();
        let run = self.element_run(kind, element)?;
        let elements = self.text(self.span_from(start));
        self.expect(kind.close, kind.label)?;

        let span = self.span_from(start);
        self.warn_at(
            mark,
            ErrorCode::E100,
            format!("Missing '{}' for {} '{elements}'", kind.open, kind.label),
            span,
        );
        Ok(Spanned::new(run.into_list(BracketShape::MissingOpen), span))
    }

    fn list_missing_close<E>(
        &mut self,
        kind: ListKind,
        element: ElementParser<'t, E>,
    ) -> IResult<Spanned<BracketedList<E>>> {
        let start = self.position();
        let mark = self.diagnostics.len();
        self.expect(kind.open, kind.label)?;
        let elements_start = self.position();
        let run = self.element_run(kind, element)?;
        if !self.at_list_boundary(kind.boundary) {
            return self.backtrack(kind.label);
        }

        let elements = self.text(self.span_from(elements_start));
        let span = self.span_from(start);
        self.warn_at(
            mark,
            ErrorCode::E101,
            format!("Missing '{}' for {} '{elements}'", kind.close, kind.label),
            span,
        );
        Ok(Spanned::new(run.into_list(BracketShape::MissingClose), span))
    }

    fn list_missing_both<E>(
        &mut self,
        kind: ListKind,
        element: ElementParser<'t, E>,
    ) -> IResult<Spanned<BracketedList<E>>> {
        let start = self.position();
        let mark = self.diagnostics.len();
        let run = self.element_run(kind, element)?;
        if !self.at_list_boundary(kind.boundary) {
            return self.backtrack(kind.label);
        }

        let span = self.span_from(start);
        self.warn_at(
            mark,
            ErrorCode::E102,
            format!(
                "Missing '{}' for {} '{}'",
                kind.brackets(),
                kind.label,
                self.text(span)
            ),
            span,
        );
        Ok(Spanned::new(run.into_list(BracketShape::MissingBoth), span))
    }

    fn list_wrong_brackets<E>(
        &mut self,
        kind: ListKind,
        element: ElementParser<'t, E>,
    ) -> IResult<Spanned<BracketedList<E>>> {
        let start = self.position();
        let mark = self.diagnostics.len();
        let open = self.next_if("opening bracket", Token::is_opening_bracket)?.token;
        let elements_start = self.position();
        let run = self.element_run(kind, element)?;
        let elements = self.text(self.span_from(elements_start));
        let close = self.next_if("closing bracket", Token::is_closing_bracket)?.token;
        if open == kind.open && close == kind.close {
            return self.backtrack(kind.label);
        }

        let span = self.span_from(start);
        self.warn_at(
            mark,
            ErrorCode::E103,
            format!(
                "Wrong bracket format for {} '{elements}', expecting '{}'",
                kind.label,
                kind.brackets()
            ),
            span,
        );
        let brackets = BracketShape::Wrong {
            open: bracket_char(open),
            close: bracket_char(close),
        };
        Ok(Spanned::new(run.into_list(brackets), span))
    }

    /// Elements separated by `;`, or by `,`/`:` with a warning.
    fn element_run<E>(
        &mut self,
        kind: ListKind,
        element: ElementParser<'t, E>,
    ) -> IResult<ElementRun<E>> {
        let start = self.position();
        let mark = self.diagnostics.len();
        let mut elements = vec![self.list_element(kind, element)?];
        let mut separators = SeparatorShape::Correct;

        if !kind.single {
            while let Some((separator, next)) = self.optional(|p| {
                let separator = p.next_if("';'", |t| {
                    matches!(t, Token::Semicolon | Token::Comma | Token::Colon)
                })?;
                Ok((separator.token, p.list_element(kind, element)?))
            }) {
                if separator != Token::Semicolon {
                    separators = SeparatorShape::Incorrect;
                }
                elements.push(next);
            }
        }

        if separators == SeparatorShape::Incorrect {
            let span = self.span_from(start);
            self.warn_at(
                mark,
                ErrorCode::E104,
                format!(
                    "Incorrect use of separators in {} '{}', expecting ';'",
                    kind.label,
                    self.text(span)
                ),
                span,
            );
        }
        Ok(ElementRun {
            elements,
            separators,
        })
    }

    /// One element, or several readings joined by `::`.
    fn list_element<E>(
        &mut self,
        kind: ListKind,
        element: ElementParser<'t, E>,
    ) -> IResult<ListElement<E>> {
        let first = element(self)?;
        if kind.single {
            return Ok(ListElement::Single(first));
        }

        let mut readings = vec![first];
        while let Some(next) = self.optional(|p| {
            p.expect(Token::DoubleColon, "'::'")?;
            element(p)
        }) {
            readings.push(next);
        }

        Ok(if readings.len() == 1 {
            ListElement::Single(readings.remove(0))
        } else {
            ListElement::Ambiguous(readings)
        })
    }

    // ------------------------------------------------------------------
    // Element grammars
    // ------------------------------------------------------------------

    /// Breakpoints of one chromosome, detailed form first.
    pub(super) fn breakpoint_group(&mut self) -> IResult<BreakpointGroup> {
        self.attempt(Self::detailed_group)
            .or_else(|_| self.simple_group())
    }

    fn simple_group(&mut self) -> IResult<BreakpointGroup> {
        let mut breakpoints = vec![self.breakpoint()?];
        while let Some(next) = self.optional(Self::breakpoint) {
            breakpoints.push(next);
        }
        Ok(BreakpointGroup::Simple(breakpoints))
    }

    /// `pter->q13::q33->qter`; at least one `->` is required.
    fn detailed_group(&mut self) -> IResult<BreakpointGroup> {
        let mut segments = vec![self.segment()?];
        while let Some(next) = self.optional(|p| {
            p.expect(Token::DoubleColon, "'::'")?;
            p.segment()
        }) {
            segments.push(next);
        }

        if segments.iter().all(|segment| segment.to.is_none()) {
            return self.backtrack("'->'");
        }
        Ok(BreakpointGroup::Detailed(segments))
    }

    fn segment(&mut self) -> IResult<Segment> {
        let from = self.breakpoint()?;
        let to = self.optional(|p| {
            p.expect(Token::Arrow, "'->'")?;
            p.breakpoint()
        });
        Ok(Segment { from, to })
    }

    /// Chromosome and breakpoints in one element: `5q13q33`, `17q`.
    pub(super) fn detailed_entry(&mut self) -> IResult<DetailedEntry> {
        let chromosome = self.chromosome()?;
        let mut breakpoints = vec![self.breakpoint()?];
        while let Some(next) = self.optional(Self::breakpoint) {
            breakpoints.push(next);
        }
        Ok(DetailedEntry {
            chromosome,
            breakpoints,
        })
    }

    /// `?`, `?5`, `?q`, `?5q`
    pub(super) fn uncertain_chromosome(&mut self) -> IResult<UncertainChromosome> {
        self.expect(Token::Question, "'?'")?;
        let chromosome = self.optional(Self::chromosome).map(|c| *c.inner());
        let arm = self.optional(Self::arm);
        Ok(UncertainChromosome { chromosome, arm })
    }
}

impl<E> ElementRun<E> {
    fn into_list(self, brackets: BracketShape) -> BracketedList<E> {
        BracketedList {
            brackets,
            separators: self.separators,
            elements: self.elements,
        }
    }
}

fn bracket_char(token: Token) -> char {
    token.to_string().chars().next().unwrap_or('?')
}
