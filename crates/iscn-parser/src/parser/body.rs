//! Karyotype bodies and their parts: chromosome count, modal number, gender,
//! special markers and cell count.

use iscn_core::semantic::Mosaicism;

use super::{
    IResult, Parser,
    lists::{CELL_COUNT, ElementParser, MODAL_NUMBER},
};
use crate::{
    error::ErrorCode,
    span::{Span, Spanned},
    tokens::Token,
    tree::{
        BodyVariant, CellCount, CellNotation, ChromosomeCount, Count, Descriptor, Event,
        EventKind, Gender, KaryotypeBody, ModalNumber, SpecialKind, SpecialMarker,
    },
};

/// The clone a derived body refers back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Derived {
    /// `idem`: the first clone.
    Idem,
    /// `sl`: the stemline.
    Stemline,
    /// `sdl`: a previous sideline.
    Sideline,
}

impl Derived {
    fn variant(self) -> BodyVariant {
        match self {
            Derived::Idem => BodyVariant::Idem,
            Derived::Stemline => BodyVariant::StemlineDerived,
            Derived::Sideline => BodyVariant::SidelineDerived,
        }
    }

    fn event_kind(self) -> EventKind {
        match self {
            Derived::Idem => EventKind::Idem,
            Derived::Stemline | Derived::Sideline => EventKind::Sideline,
        }
    }
}

/// Parts shared by every body before its descriptor.
struct Head {
    start: usize,
    mosaicism: Option<Spanned<Mosaicism>>,
    count: Option<Spanned<ChromosomeCount>>,
    modal: Option<Spanned<ModalNumber>>,
}

type Tail = (Vec<Spanned<Event>>, Option<Spanned<CellCount>>);

impl<'t> Parser<'t> {
    /// Body of a first or independent clone.
    pub(super) fn standard_body(&mut self) -> IResult<Spanned<KaryotypeBody>> {
        let variant = BodyVariant::Standard;
        let kind = EventKind::Regular;
        self.attempt(|p| p.body_with_gender(variant, kind))
            .or_else(|_| self.attempt(|p| p.body_without_gender(variant, kind)))
            .or_else(|_| self.attempt(|p| p.body_without_count(variant, kind)))
            .or_else(|_| self.attempt(|p| p.body_of_events(variant, kind)))
    }

    /// Body of the stemline of a stemline/sideline row.
    pub(super) fn stemline_body(&mut self) -> IResult<Spanned<KaryotypeBody>> {
        let variant = BodyVariant::Stemline;
        let kind = EventKind::Stemline;
        self.attempt(|p| p.body_with_gender(variant, kind))
            .or_else(|_| self.attempt(|p| p.body_without_gender(variant, kind)))
    }

    /// Body of an `idem`, `sl` or `sdl` clone.
    fn derived_body(&mut self, derived: Derived) -> IResult<Spanned<KaryotypeBody>> {
        self.attempt(|p| p.body_with_special(derived))
            .or_else(|_| self.attempt(|p| p.body_with_special_without_count(derived)))
    }

    pub(super) fn idem_body(&mut self) -> IResult<Spanned<KaryotypeBody>> {
        self.derived_body(Derived::Idem)
    }

    pub(super) fn sl_body(&mut self) -> IResult<Spanned<KaryotypeBody>> {
        self.derived_body(Derived::Stemline)
    }

    pub(super) fn sdl_body(&mut self) -> IResult<Spanned<KaryotypeBody>> {
        self.derived_body(Derived::Sideline)
    }

    // ------------------------------------------------------------------
    // Body shapes
    // ------------------------------------------------------------------

    fn counted_head(&mut self) -> IResult<Head> {
        let start = self.position();
        let mosaicism = self.optional(Self::mosaicism);
        let (count, modal) = match self.attempt(Self::count_with_unopened_modal) {
            Ok((count, modal)) => (count, Some(modal)),
            Err(_) => {
                let count = self.chromosome_count()?;
                (count, self.optional(Self::modal_number))
            }
        };
        Ok(Head {
            start,
            mosaicism,
            count: Some(count),
            modal,
        })
    }

    /// `693n>`: the ploidy digit of a modal number missing its `<` is read
    /// off the end of the count.
    fn count_with_unopened_modal(
        &mut self,
    ) -> IResult<(Spanned<ChromosomeCount>, Spanned<ModalNumber>)> {
        let mut digits = 0;
        while matches!(self.peek_nth(digits), Some(Token::Digit(_))) {
            digits += 1;
        }
        if digits < 2 || self.peek_nth(digits) != Some(Token::Letter('n')) {
            return self.backtrack("modal number");
        }
        let count = self.integer_prefix(digits - 1)?;
        let modal = self.modal_number()?;
        Ok((count.map(|n| ChromosomeCount::Exact(*n)), modal))
    }

    fn uncounted_head(&mut self) -> Head {
        let start = self.position();
        let mosaicism = self.optional(Self::mosaicism);
        Head {
            start,
            mosaicism,
            count: None,
            modal: None,
        }
    }

    fn finish_body(
        &self,
        head: Head,
        variant: BodyVariant,
        descriptor: Option<Descriptor>,
        (events, cells): Tail,
    ) -> Spanned<KaryotypeBody> {
        let body = KaryotypeBody {
            variant,
            mosaicism: head.mosaicism,
            count: head.count,
            modal: head.modal,
            descriptor,
            events,
            cells,
        };
        self.spanned(head.start, body)
    }

    /// `46,XY,+21[20]`
    fn body_with_gender(
        &mut self,
        variant: BodyVariant,
        kind: EventKind,
    ) -> IResult<Spanned<KaryotypeBody>> {
        let head = self.counted_head()?;
        let gender = self.comma_prefixed(Self::gender)?;
        let tail = self.body_tail(kind);
        Ok(self.finish_body(head, variant, Some(Descriptor::Gender(gender)), tail))
    }

    /// `45,-X`: gender is only reported missing when no event names a sex
    /// chromosome.
    fn body_without_gender(
        &mut self,
        variant: BodyVariant,
        kind: EventKind,
    ) -> IResult<Spanned<KaryotypeBody>> {
        let head = self.counted_head()?;
        let head_span = self.span_from(head.start);
        let mark = self.diagnostics.len();
        let tail = self.body_tail(kind);

        if self.ctx.sex_chromosomes().is_empty() {
            let ordinal = self.ctx.clone_ordinal();
            self.warn_at(
                mark,
                ErrorCode::E302,
                format!("Missing gender in clone # {ordinal}"),
                head_span,
            );
        }
        Ok(self.finish_body(head, variant, None, tail))
    }

    /// `XX,+21`
    fn body_without_count(
        &mut self,
        variant: BodyVariant,
        kind: EventKind,
    ) -> IResult<Spanned<KaryotypeBody>> {
        let head = self.uncounted_head();
        let mark = self.diagnostics.len();
        let gender = self.gender()?;
        self.warn_missing_count(mark, gender.span());
        let tail = self.body_tail(kind);
        Ok(self.finish_body(head, variant, Some(Descriptor::Gender(gender)), tail))
    }

    /// `+21,+8`: at least one event, the first one without its comma.
    fn body_of_events(
        &mut self,
        variant: BodyVariant,
        kind: EventKind,
    ) -> IResult<Spanned<KaryotypeBody>> {
        let head = self.uncounted_head();
        let mark = self.diagnostics.len();
        let first = self.leading_event(kind)?;
        let ordinal = self.ctx.clone_ordinal();
        self.warn_at(
            mark,
            ErrorCode::E304,
            format!("Missing chromosome numbers and gender in clone # {ordinal}"),
            first.span(),
        );

        let (mut events, cells) = self.body_tail(kind);
        events.insert(0, first);
        Ok(self.finish_body(head, variant, None, (events, cells)))
    }

    /// `47,idem,+8`
    fn body_with_special(&mut self, derived: Derived) -> IResult<Spanned<KaryotypeBody>> {
        let head = self.counted_head()?;
        let special = match derived {
            Derived::Idem => self.comma_prefixed(Self::idem_marker)?,
            Derived::Stemline => self.comma_prefixed(Self::sl_marker)?,
            Derived::Sideline => self.comma_prefixed(Self::sdl_marker)?,
        };
        let tail = self.body_tail(derived.event_kind());
        Ok(self.finish_body(
            head,
            derived.variant(),
            Some(Descriptor::Special(special)),
            tail,
        ))
    }

    /// `idem,+8`
    fn body_with_special_without_count(
        &mut self,
        derived: Derived,
    ) -> IResult<Spanned<KaryotypeBody>> {
        let head = self.uncounted_head();
        let mark = self.diagnostics.len();
        let special = self.special_marker(derived)?;
        self.warn_missing_count(mark, special.span());
        let tail = self.body_tail(derived.event_kind());
        Ok(self.finish_body(
            head,
            derived.variant(),
            Some(Descriptor::Special(special)),
            tail,
        ))
    }

    fn warn_missing_count(&mut self, mark: usize, span: Span) {
        let ordinal = self.ctx.clone_ordinal();
        self.warn_at(
            mark,
            ErrorCode::E303,
            format!("Missing chromosome number in clone # {ordinal}"),
            span,
        );
    }

    /// Events followed by an optional cell count.
    fn body_tail(&mut self, kind: EventKind) -> Tail {
        let mut events = Vec::new();
        while let Some(event) = self.optional(|p| p.event(kind)) {
            events.push(event);
        }
        let cells = self.optional(Self::cell_count);
        (events, cells)
    }

    // ------------------------------------------------------------------
    // Body parts
    // ------------------------------------------------------------------

    /// `,content`, with missing and doubled commas accepted with a warning.
    fn comma_prefixed<T>(&mut self, content: ElementParser<'t, Spanned<T>>) -> IResult<Spanned<T>> {
        self.attempt(|p| {
            p.expect(Token::Comma, "','")?;
            content(p)
        })
        .or_else(|_| {
            self.attempt(|p| {
                let mark = p.diagnostics.len();
                let value = content(p)?;
                p.warn_at(
                    mark,
                    ErrorCode::E300,
                    format!("Missing a comma before '{}'", p.text(value.span())),
                    value.span(),
                );
                Ok(value)
            })
        })
        .or_else(|_| {
            self.attempt(|p| {
                p.expect(Token::Comma, "','")?;
                p.extra_commas()?;
                let mark = p.diagnostics.len();
                let value = content(p)?;
                p.warn_at(
                    mark,
                    ErrorCode::E301,
                    format!("Too many commas before '{}'", p.text(value.span())),
                    value.span(),
                );
                Ok(value)
            })
        })
    }

    /// `46`, `45~48` or `?`
    fn chromosome_count(&mut self) -> IResult<Spanned<ChromosomeCount>> {
        let start = self.position();
        if self.optional(|p| p.expect(Token::Question, "'?'")).is_some() {
            return Ok(self.spanned(start, ChromosomeCount::Unknown));
        }
        let count = self.count()?;
        Ok(count.map(|count| match *count {
            Count::Exact(n) | Count::Approximate(n) => ChromosomeCount::Exact(n),
            Count::Range { from, to } => ChromosomeCount::Range { from, to },
        }))
    }

    /// `<3n>`, `<2n+>`
    fn modal_number(&mut self) -> IResult<Spanned<ModalNumber>> {
        let value = self.bracketed_value(MODAL_NUMBER, Self::ploidy)?;
        Ok(value.map(|((level, modifier), brackets)| ModalNumber {
            level: *level,
            modifier: *modifier,
            brackets: *brackets,
        }))
    }

    /// `XY`, `XX/or/XY`, `XXc`
    fn gender(&mut self) -> IResult<Spanned<Gender>> {
        let start = self.position();
        let mut complements = vec![self.sex_complement()?];
        while let Some(next) = self.optional(|p| {
            p.or_separator()?;
            p.sex_complement()
        }) {
            complements.push(next);
        }
        let constitutional = self
            .optional(|p| p.expect(Token::Letter('c'), "'c'"))
            .is_some();
        Ok(self.spanned(
            start,
            Gender {
                complements,
                constitutional,
            },
        ))
    }

    fn idem_marker(&mut self) -> IResult<Spanned<SpecialMarker>> {
        self.special_marker(Derived::Idem)
    }

    fn sl_marker(&mut self) -> IResult<Spanned<SpecialMarker>> {
        self.special_marker(Derived::Stemline)
    }

    fn sdl_marker(&mut self) -> IResult<Spanned<SpecialMarker>> {
        self.special_marker(Derived::Sideline)
    }

    /// `idem`, `sl`, `sdl` or `sdl2`, each with an optional `×N`.
    fn special_marker(&mut self, derived: Derived) -> IResult<Spanned<SpecialMarker>> {
        let start = self.position();
        let kind = match derived {
            Derived::Idem => self.keyword("idem").map(|_| SpecialKind::Idem)?,
            Derived::Stemline => self.keyword("sl").map(|_| SpecialKind::Stemline)?,
            Derived::Sideline => {
                self.keyword("sdl")?;
                SpecialKind::Sideline(self.optional(Self::integer).map(|n| *n))
            }
        };
        let multiplier = self.optional(Self::multiplier);
        Ok(self.spanned(start, SpecialMarker { kind, multiplier }))
    }

    /// `[20]`, `[cp20]`
    fn cell_count(&mut self) -> IResult<Spanned<CellCount>> {
        let value = self.bracketed_value(CELL_COUNT, Self::cell_content)?;
        Ok(value.map(|((count, notation), brackets)| CellCount {
            count: *count,
            notation: notation.clone(),
            brackets: *brackets,
        }))
    }

    fn cell_content(&mut self) -> IResult<(u32, CellNotation)> {
        self.attempt(|p| {
            p.keyword("cp")?;
            Ok((*p.integer()?, CellNotation::Composite))
        })
        .or_else(|_| {
            self.attempt(|p| {
                let start = p.position();
                let count = *p.integer()?;
                p.keyword("cp")?;
                let span = p.span_from(start);
                p.warn(
                    ErrorCode::E402,
                    format!(
                        "Incorrect expression of composite karyotype (cp) '{}'",
                        p.text(span)
                    ),
                    span,
                );
                Ok((count, CellNotation::MisplacedComposite))
            })
        })
        .or_else(|_| {
            self.attempt(|p| {
                let start = p.position();
                let count = *p.integer()?;
                let word = p.keyword("cells").or_else(|_| p.keyword("cell"))?;
                let span = p.span_from(start);
                p.warn(
                    ErrorCode::E403,
                    format!("Incorrect addition of the word 'cell(s)' '{}'", p.text(span)),
                    span,
                );
                Ok((count, CellNotation::CellWord(p.text(word).to_string())))
            })
        })
        .or_else(|_| self.integer().map(|n| (*n, CellNotation::Plain)))
    }
}
