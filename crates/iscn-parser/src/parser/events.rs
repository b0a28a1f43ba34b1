//! Events: whole-chromosome gains and losses, structural aberrations,
//! markers and double minutes.

use iscn_core::chromosome::SexChromosome;

use super::{
    IResult, Parser,
    lists::{
        BREAKPOINTS_LIST, CHROMOSOME_LIST, DERIVATIVE_BREAKPOINTS_LIST,
        DERIVATIVE_CHROMOSOME_LIST, DETAILED_BREAKPOINTS_LIST, ListKind, UNCERTAIN_CHROMOSOME,
    },
};
use crate::{
    error::ErrorCode,
    span::{Span, Spanned},
    tokens::Token,
    tree::{
        Aberration, AberrationId, BasicAberration, BreakpointsList, DerivativeAberration,
        DerivativeId, Event, EventKind, GainLoss, Location, NumericalChange, RegEvent,
        RegEventType, Rearrangement, RearrangementElement, Sign, UncertainAberration, Undecoded,
        UndecodedSpecial,
    },
};

/// List kinds used for the location of an aberration.
#[derive(Debug, Clone, Copy)]
struct LocationKinds {
    chromosomes: ListKind,
    breakpoints: ListKind,
}

const BASIC_LOCATION: LocationKinds = LocationKinds {
    chromosomes: CHROMOSOME_LIST,
    breakpoints: BREAKPOINTS_LIST,
};

const DERIVATIVE_LOCATION: LocationKinds = LocationKinds {
    chromosomes: DERIVATIVE_CHROMOSOME_LIST,
    breakpoints: DERIVATIVE_BREAKPOINTS_LIST,
};

/// How commas around an aberration's lists are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Commas {
    /// No comma allowed; a missing breakpoints list must not be followed by
    /// `,` and a breakpoints list.
    Forbidden,
    /// At least one stray comma before a list is required and reported.
    Misplaced,
}

impl<'t> Parser<'t> {
    /// An event of a karyotype body, preceded by its comma.
    pub(super) fn event(&mut self, kind: EventKind) -> IResult<Spanned<Event>> {
        self.attempt(|p| {
            p.expect(Token::Comma, "','")?;
            p.event_after_commas(kind)
        })
        .or_else(|_| {
            self.attempt(|p| {
                p.expect(Token::Comma, "','")?;
                p.extra_commas()?;
                let mark = p.diagnostics.len();
                let event = p.event_after_commas(kind)?;
                p.warn_at(
                    mark,
                    ErrorCode::E301,
                    format!("Too many commas before '{}'", p.text(event.span())),
                    event.span(),
                );
                Ok(event)
            })
        })
        .or_else(|_| {
            self.attempt(|p| {
                let mark = p.diagnostics.len();
                let event = p.event_after_commas(kind)?;
                p.warn_at(
                    mark,
                    ErrorCode::E300,
                    format!("Missing a comma before '{}'", p.text(event.span())),
                    event.span(),
                );
                Ok(event)
            })
        })
    }

    /// An event with no comma required, as the first event of a body that
    /// has neither count nor gender.
    pub(super) fn leading_event(&mut self, kind: EventKind) -> IResult<Spanned<Event>> {
        self.attempt(|p| p.event_after_commas(kind))
            .or_else(|_| self.event(kind))
    }

    fn event_after_commas(&mut self, kind: EventKind) -> IResult<Spanned<Event>> {
        let event = self.memoized_reg_event()?;
        let span = event.span();
        Ok(Spanned::new(Event { kind, event }, span))
    }

    /// One or more commas after a first one.
    pub(super) fn extra_commas(&mut self) -> IResult<()> {
        self.expect(Token::Comma, "','")?;
        while self.peek() == Some(Token::Comma) {
            self.expect(Token::Comma, "','")?;
        }
        Ok(())
    }

    /// An event with its `/or/` alternative readings.
    pub(super) fn reg_event(&mut self) -> IResult<Spanned<RegEvent>> {
        let start = self.position();
        let mut interpretations = vec![self.reg_event_type()?];
        while let Some(next) = self.optional(|p| {
            p.or_separator()?;
            p.reg_event_type()
        }) {
            interpretations.push(next);
        }
        Ok(self.spanned(start, RegEvent { interpretations }))
    }

    fn reg_event_type(&mut self) -> IResult<Spanned<RegEventType>> {
        let start = self.position();
        let event = self
            .attempt(Self::undecoded_special)
            .map(RegEventType::UndecodedSpecial)
            .or_else(|_| self.attempt(Self::aberration).map(RegEventType::Aberration))
            .or_else(|_| self.attempt(Self::undecoded).map(RegEventType::Undecoded))
            .or_else(|_| self.keyword("inc").map(|_| RegEventType::Incomplete))
            .or_else(|_| self.attempt(Self::gain_loss).map(RegEventType::GainLoss))?;
        Ok(self.spanned(start, event))
    }

    // ------------------------------------------------------------------
    // Numerical changes
    // ------------------------------------------------------------------

    /// `+21`, `-X`, `+8c`, and the undetermined `+-7`.
    fn gain_loss(&mut self) -> IResult<GainLoss> {
        self.attempt(|p| {
            let change = match p.sign()? {
                Sign::Plus => NumericalChange::Gain,
                Sign::Minus => NumericalChange::Loss,
            };
            let chromosome = p.chromosome()?;
            let suffix = p.suffix();
            p.note_sex_chromosomes(chromosome.sex_chromosome());
            Ok(GainLoss {
                change,
                chromosome: Some(chromosome),
                suffix,
            })
        })
        .or_else(|_| self.attempt(Self::undetermined_gain_loss))
    }

    fn undetermined_gain_loss(&mut self) -> IResult<GainLoss> {
        let start = self.position();
        let first = self.sign()?;
        let second = self.sign()?;
        if first == second {
            return self.backtrack("chromosome");
        }
        let sign = self.text(self.span_from(start)).to_string();
        let chromosome = self.optional(Self::chromosome);
        let suffix = self.suffix();

        let chromosome_text = chromosome
            .as_ref()
            .map(|c| self.text(c.span()))
            .unwrap_or_default();
        self.warn(
            ErrorCode::E400,
            format!(
                "Undetermined prefix '{sign}' before '{chromosome_text}', cannot use both '-' and '+'"
            ),
            self.span_from(start),
        );
        self.note_sex_chromosomes(chromosome.as_ref().and_then(|c| c.sex_chromosome()));
        Ok(GainLoss {
            change: NumericalChange::Undetermined(sign),
            chromosome,
            suffix,
        })
    }

    fn note_sex_chromosomes(&mut self, sex: impl IntoIterator<Item = SexChromosome>) {
        for sex in sex {
            self.ctx.note_sex_chromosome(sex);
        }
    }

    // ------------------------------------------------------------------
    // Aberrations
    // ------------------------------------------------------------------

    fn aberration(&mut self) -> IResult<Aberration> {
        self.attempt(|p| p.basic_aberration(Commas::Forbidden).map(Aberration::Basic))
            .or_else(|_| {
                self.attempt(|p| p.derivative_aberration(Commas::Forbidden))
                    .map(Aberration::Derivative)
            })
            .or_else(|_| {
                self.attempt(Self::uncertain_aberration)
                    .map(Aberration::Uncertain)
            })
            .or_else(|_| {
                self.attempt(|p| p.basic_aberration(Commas::Misplaced))
                    .map(Aberration::BasicMisplacedComma)
            })
            .or_else(|_| {
                self.attempt(|p| p.derivative_aberration(Commas::Misplaced))
                    .map(Aberration::DerivativeMisplacedComma)
            })
    }

    /// `[+|-][?]`, returned as prefix sign and questioned flag.
    fn aberration_prefix(&mut self) -> (Option<Sign>, bool) {
        let prefix = self.optional(Self::sign);
        let questioned = self
            .optional(|p| p.expect(Token::Question, "'?'"))
            .is_some();
        (prefix, questioned)
    }

    fn aberration_id(&mut self) -> IResult<Spanned<AberrationId>> {
        let start = self.position();
        for id in AberrationId::ALL {
            if self.keyword(id.keyword()).is_ok() {
                return Ok(self.spanned(start, id));
            }
        }
        self.backtrack("aberration")
    }

    fn derivative_id(&mut self) -> IResult<Spanned<DerivativeId>> {
        let start = self.position();
        for id in DerivativeId::ALL {
            if self.keyword(id.keyword()).is_ok() {
                return Ok(self.spanned(start, id));
            }
        }
        self.backtrack("derivative chromosome")
    }

    /// `del(5)(q13q33)`, `t(9;22)(q34;q11.2)`, `del(5q13q33)`, `i(17q)`.
    fn basic_aberration(&mut self, commas: Commas) -> IResult<BasicAberration> {
        let (prefix, questioned) = self.aberration_prefix();
        let id = self.aberration_id()?;
        let location = self.location(BASIC_LOCATION, commas)?;
        let suffix = self.suffix();

        self.note_sex_chromosomes(location.sex_chromosomes());
        Ok(BasicAberration {
            prefix,
            questioned,
            id,
            location,
            suffix,
        })
    }

    /// The location of an aberration: separate lists, then the detailed
    /// single-bracket form.
    fn location(&mut self, kinds: LocationKinds, commas: Commas) -> IResult<Location> {
        match commas {
            Commas::Forbidden => self
                .attempt(|p| {
                    let chromosomes = p.bracketed_list(kinds.chromosomes, Self::chromosome)?;
                    let breakpoints = p.breakpoints_without_comma(kinds.breakpoints)?;
                    Ok(Location::Lists {
                        chromosomes,
                        breakpoints,
                    })
                })
                .or_else(|_| {
                    self.bracketed_list(DETAILED_BREAKPOINTS_LIST, Self::detailed_entry)
                        .map(Location::Detailed)
                }),
            Commas::Misplaced => {
                let mark = self.diagnostics.len();
                let leading = self.stray_comma();
                let location = self
                    .attempt(|p| {
                        let chromosomes = p.bracketed_list(kinds.chromosomes, Self::chromosome)?;
                        let breakpoints = p.optional(|p| p.breakpoints_after_stray_comma(kinds));
                        let misplaced = breakpoints.as_ref().is_some_and(|(_, comma)| *comma);
                        if leading.is_none() && !misplaced {
                            return p.backtrack("','");
                        }
                        Ok(Location::Lists {
                            chromosomes,
                            breakpoints: breakpoints.map(|(list, _)| list),
                        })
                    })
                    .or_else(|_| {
                        if leading.is_none() {
                            return self.backtrack("','");
                        }
                        self.bracketed_list(DETAILED_BREAKPOINTS_LIST, Self::detailed_entry)
                            .map(Location::Detailed)
                    })?;

                if leading.is_some() {
                    let span = match &location {
                        Location::Lists { chromosomes, .. } => chromosomes.span(),
                        Location::Detailed(list) => list.span(),
                    };
                    self.warn_at(
                        mark,
                        ErrorCode::E401,
                        format!("Incorrect comma before '{}'", self.text(span)),
                        span,
                    );
                }
                Ok(location)
            }
        }
    }

    /// Optional breakpoints list directly after the chromosome list.
    ///
    /// Fails when there is no list but a comma followed by one, so that the
    /// misplaced-comma reading gets a chance.
    fn breakpoints_without_comma(
        &mut self,
        kind: ListKind,
    ) -> IResult<Option<Spanned<BreakpointsList>>> {
        if let Some(list) = self.optional(|p| p.bracketed_list(kind, Self::breakpoint_group)) {
            return Ok(Some(list));
        }
        let comma_then_list = self.peek() == Some(Token::Comma)
            && self.lookahead(|p| {
                p.expect(Token::Comma, "','")?;
                p.bracketed_list(kind, Self::breakpoint_group)
            });
        if comma_then_list {
            return self.backtrack(kind.label);
        }
        Ok(None)
    }

    /// A breakpoints list with an optional stray comma before it; the flag
    /// says whether the comma was there.
    fn breakpoints_after_stray_comma(
        &mut self,
        kinds: LocationKinds,
    ) -> IResult<(Spanned<BreakpointsList>, bool)> {
        let mark = self.diagnostics.len();
        let comma = self.stray_comma();
        let list = self.bracketed_list(kinds.breakpoints, Self::breakpoint_group)?;
        if comma.is_some() {
            self.warn_at(
                mark,
                ErrorCode::E401,
                format!("Incorrect comma before '{}'", self.text(list.span())),
                list.span(),
            );
        }
        Ok((list, comma.is_some()))
    }

    fn stray_comma(&mut self) -> Option<Span> {
        self.optional(|p| p.expect(Token::Comma, "','"))
    }

    /// `der(22)t(9;22)(q34;q11.2)`, `der(1;7)(q10;p10)`.
    fn derivative_aberration(&mut self, commas: Commas) -> IResult<DerivativeAberration> {
        let (prefix, questioned) = self.aberration_prefix();
        let id = self.derivative_id()?;

        let (chromosomes, breakpoints) = match commas {
            Commas::Forbidden => {
                let chromosomes =
                    self.bracketed_list(DERIVATIVE_CHROMOSOME_LIST, Self::chromosome)?;
                let breakpoints = self.breakpoints_without_comma(DERIVATIVE_BREAKPOINTS_LIST)?;
                (chromosomes, breakpoints)
            }
            Commas::Misplaced => match self.location(DERIVATIVE_LOCATION, Commas::Misplaced)? {
                Location::Lists {
                    chromosomes,
                    breakpoints,
                } => (chromosomes, breakpoints),
                Location::Detailed(_) => return self.backtrack("derivative chromosome list"),
            },
        };

        let mut rearrangements = Vec::new();
        while let Some(element) = self.optional(Self::rearrangement_element) {
            rearrangements.push(element);
        }
        let suffix = self.suffix();

        let derivative = DerivativeAberration {
            prefix,
            questioned,
            id,
            chromosomes,
            breakpoints,
            rearrangements,
            suffix,
        };
        self.note_sex_chromosomes(
            derivative
                .chromosomes()
                .iter()
                .filter_map(|c| c.sex_chromosome())
                .collect::<Vec<_>>(),
        );
        Ok(derivative)
    }

    /// A rearrangement with its `/or/` alternatives.
    fn rearrangement_element(&mut self) -> IResult<Spanned<RearrangementElement>> {
        let start = self.position();
        let mut alternatives = vec![self.rearrangement()?];
        while let Some(next) = self.optional(|p| {
            p.or_separator()?;
            p.rearrangement()
        }) {
            alternatives.push(next);
        }
        Ok(self.spanned(start, RearrangementElement { alternatives }))
    }

    pub(super) fn rearrangement(&mut self) -> IResult<Spanned<Rearrangement>> {
        let start = self.position();
        let id = self.aberration_id()?;
        let location = self.location(BASIC_LOCATION, Commas::Forbidden)?;
        self.note_sex_chromosomes(location.sex_chromosomes());
        Ok(self.spanned(start, Rearrangement { id, location }))
    }

    /// `add(?5q)`, `del(?q)`
    fn uncertain_aberration(&mut self) -> IResult<UncertainAberration> {
        let prefix = self.optional(Self::sign);
        let id = self.aberration_id()?;
        let chromosome = self.bracketed_list(UNCERTAIN_CHROMOSOME, Self::uncertain_chromosome)?;
        let suffix = self.suffix();

        let sex: Vec<SexChromosome> = chromosome
            .readings()
            .filter_map(|u| u.chromosome.and_then(|c| c.sex_chromosome()))
            .collect();
        self.note_sex_chromosomes(sex);
        Ok(UncertainAberration {
            prefix,
            id,
            chromosome,
            suffix,
        })
    }

    // ------------------------------------------------------------------
    // Undecoded material
    // ------------------------------------------------------------------

    /// `+?mar`, `?mar2`
    fn undecoded_special(&mut self) -> IResult<UndecodedSpecial> {
        let sign = self.optional(Self::sign);
        self.expect(Token::Question, "'?'")?;
        self.keyword("mar")?;
        let number = self.optional(Self::integer).map(|n| *n);
        Ok(UndecodedSpecial { sign, number })
    }

    /// Markers and double minutes, with optional sign and counts.
    fn undecoded(&mut self) -> IResult<Undecoded> {
        self.attempt(|p| {
            let sign = p.optional(Self::sign);
            let count = p.optional(Self::count);
            p.keyword("mar")?;
            let number = p.optional(Self::integer).map(|n| *n);
            let suffix = p.suffix();
            Ok(Undecoded::Marker {
                sign,
                count,
                number,
                suffix,
            })
        })
        .or_else(|_| {
            self.attempt(|p| {
                let sign = p.optional(Self::sign);
                let count = p.optional(Self::count);
                p.keyword("dmin")?;
                Ok(Undecoded::DoubleMinute { sign, count })
            })
        })
        .or_else(|_| {
            self.attempt(|p| {
                let sign = p.optional(|p| p.expect(Token::Plus, "'+'")).map(|_| Sign::Plus);
                let count = p.approximate_count()?;
                p.keyword("dmin")?;
                Ok(Undecoded::DoubleMinute {
                    sign,
                    count: Some(count),
                })
            })
        })
    }
}
