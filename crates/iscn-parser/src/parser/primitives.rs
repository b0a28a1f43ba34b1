//! Numbers, ranges, chromosome identifiers, breakpoints and small keywords.

use iscn_core::{
    chromosome::{Chromosome, SexChromosome},
    semantic::{Mosaicism, PloidyModifier},
};

use super::{IResult, Parser};
use crate::{
    span::Spanned,
    tokens::Token,
    tree::{Arm, Band, Breakpoint, Count, Designation, Origin, SexComplement, Sign, Suffix},
};

fn is_digit(token: &Token) -> bool {
    matches!(token, Token::Digit(_))
}

fn is_range_operator(token: &Token) -> bool {
    matches!(token, Token::Approx | Token::Minus)
}

fn is_sex_letter(token: &Token) -> bool {
    matches!(token, Token::Letter(c) if SexChromosome::from_letter(*c).is_some())
}

impl<'t> Parser<'t> {
    /// `digit+`
    pub(super) fn integer(&mut self) -> IResult<Spanned<u32>> {
        let start = self.position();
        let first = self.next_if("number", is_digit)?;
        let mut value = first.digit_value().unwrap_or_default();

        while self.peek().as_ref().is_some_and(is_digit) {
            let digit = self.next_if("digit", is_digit)?;
            value = value
                .saturating_mul(10)
                .saturating_add(digit.digit_value().unwrap_or_default());
        }
        Ok(self.spanned(start, value))
    }

    /// The first `digits` digits of a longer number, as in the `69` of
    /// `693n>`.
    pub(super) fn integer_prefix(&mut self, digits: usize) -> IResult<Spanned<u32>> {
        if digits == 0 {
            return self.backtrack("number");
        }
        let start = self.position();
        let mut value: u32 = 0;
        for _ in 0..digits {
            let digit = self.next_if("digit", is_digit)?;
            value = value
                .saturating_mul(10)
                .saturating_add(digit.digit_value().unwrap_or_default());
        }
        Ok(self.spanned(start, value))
    }

    /// Type I range: `N`, `N~M` or `N-M`.
    pub(super) fn count(&mut self) -> IResult<Spanned<Count>> {
        let start = self.position();
        let from = *self.integer()?;
        let to = self.optional(|p| {
            p.next_if("'~' or '-'", is_range_operator)?;
            p.integer()
        });
        let count = match to {
            Some(to) => Count::Range { from, to: *to },
            None => Count::Exact(from),
        };
        Ok(self.spanned(start, count))
    }

    /// Type III range: `~N` or `-N`.
    pub(super) fn approximate_count(&mut self) -> IResult<Spanned<Count>> {
        let start = self.position();
        self.next_if("'~'", is_range_operator)?;
        let count = *self.integer()?;
        Ok(self.spanned(start, Count::Approximate(count)))
    }

    /// A band or subband number: digits and `?`.
    fn band_digits(&mut self) -> IResult<String> {
        let mut text = String::new();
        while matches!(self.peek(), Some(Token::Digit(_) | Token::Question)) {
            let token = self.next_if("band", |t| matches!(t, Token::Digit(_) | Token::Question))?;
            text.push_str(&token.token.to_string());
        }
        if text.is_empty() {
            return self.backtrack("band");
        }
        Ok(text)
    }

    /// Band digits with an optional Type II range: `21`, `21~23`, `2-3`.
    pub(super) fn designation(&mut self) -> IResult<Designation> {
        let value = self.band_digits()?;
        let range_to = self.optional(|p| {
            p.next_if("'~' or '-'", is_range_operator)?;
            p.band_digits()
        });
        Ok(Designation { value, range_to })
    }

    /// A chromosome identifier: a number, `X`, `Y` or `?`.
    pub(super) fn chromosome(&mut self) -> IResult<Spanned<Chromosome>> {
        let start = self.position();
        if let Some(number) = self.optional(Self::integer) {
            return Ok(number.map(|n| Chromosome::Numbered(*n)));
        }

        let token = self.next_if("chromosome", |t| {
            *t == Token::Question || is_sex_letter(t)
        })?;
        let chromosome = match token.token {
            Token::Letter(c) => SexChromosome::from_letter(c)
                .map(Chromosome::Sex)
                .unwrap_or(Chromosome::Unknown),
            _ => Chromosome::Unknown,
        };
        Ok(self.spanned(start, chromosome))
    }

    /// `p` or `q`
    pub(super) fn arm(&mut self) -> IResult<Arm> {
        let token = self.next_if("'p' or 'q'", |t| {
            matches!(t, Token::Letter('p') | Token::Letter('q'))
        })?;
        Ok(match token.token {
            Token::Letter('p') => Arm::P,
            _ => Arm::Q,
        })
    }

    /// A breakpoint: `cen`, `pter`, `q`, `q21`, `q2?`, `q21~23`, `q11.2`.
    pub(super) fn breakpoint(&mut self) -> IResult<Spanned<Breakpoint>> {
        let start = self.position();
        if self.keyword("cen").is_ok() {
            return Ok(self.spanned(start, Breakpoint::centromere()));
        }

        let arm = self.arm()?;
        if self.keyword("ter").is_ok() {
            let breakpoint = Breakpoint {
                arm,
                band: Band::Terminal,
                subband: None,
            };
            return Ok(self.spanned(start, breakpoint));
        }

        let Some(band) = self.optional(Self::designation) else {
            return Ok(self.spanned(start, Breakpoint::arm_only(arm)));
        };
        let subband = self.optional(|p| {
            p.expect(Token::Period, "'.'")?;
            p.designation()
        });
        let breakpoint = Breakpoint {
            arm,
            band: Band::Numbered(band),
            subband,
        };
        Ok(self.spanned(start, breakpoint))
    }

    /// A run of sex chromosome letters such as `XXY`, in either case.
    pub(super) fn sex_complement(&mut self) -> IResult<Spanned<SexComplement>> {
        let start = self.position();
        let mut chromosomes = Vec::new();
        while self.peek().as_ref().is_some_and(is_sex_letter) {
            let token = self.next_if("sex chromosome", is_sex_letter)?;
            if let Token::Letter(c) = token.token {
                chromosomes.extend(SexChromosome::from_letter(c));
            }
        }
        if chromosomes.is_empty() {
            self.record_failure("sex chromosomes");
            return self.backtrack("sex chromosomes");
        }
        Ok(self.spanned(start, SexComplement(chromosomes)))
    }

    pub(super) fn sign(&mut self) -> IResult<Sign> {
        let token = self.next_if("'+' or '-'", |t| matches!(t, Token::Plus | Token::Minus))?;
        Ok(match token.token {
            Token::Plus => Sign::Plus,
            _ => Sign::Minus,
        })
    }

    /// `×N` or `xN`
    pub(super) fn multiplier(&mut self) -> IResult<u32> {
        self.attempt(|p| {
            p.next_if("'x'", |t| matches!(t, Token::Multiply | Token::Letter('x')))?;
            p.integer().map(|n| *n)
        })
    }

    pub(super) fn origin(&mut self) -> IResult<Origin> {
        for origin in Origin::ALL {
            if self.keyword(origin.keyword()).is_ok() {
                return Ok(origin);
            }
        }
        self.backtrack("origin")
    }

    /// Optional multiplication followed by an optional origin.
    pub(super) fn suffix(&mut self) -> Suffix {
        Suffix {
            multiplier: self.optional(Self::multiplier),
            origin: self.optional(Self::origin),
        }
    }

    /// `mos` or `chi`
    pub(super) fn mosaicism(&mut self) -> IResult<Spanned<Mosaicism>> {
        let start = self.position();
        let mosaicism = if self.keyword("mos").is_ok() {
            Mosaicism::Mosaic
        } else {
            self.keyword("chi")?;
            Mosaicism::Chimera
        };
        Ok(self.spanned(start, mosaicism))
    }

    /// Ploidy inside a modal number: `3n`, `2n+`, `4n±`.
    pub(super) fn ploidy(&mut self) -> IResult<(u32, Option<PloidyModifier>)> {
        let level = *self.integer()?;
        self.expect(Token::Letter('n'), "'n'")?;
        let modifier = self
            .optional(|p| {
                p.next_if("ploidy modifier", |t| {
                    matches!(t, Token::Plus | Token::Minus | Token::PlusMinus)
                })
            })
            .map(|token| match token.token {
                Token::Plus => PloidyModifier::Above,
                Token::Minus => PloidyModifier::Below,
                _ => PloidyModifier::AboveOrBelow,
            });
        Ok((level, modifier))
    }
}
