//! Karyotype bodies: count, ploidy, sex chromosomes, events and cells.

use std::fmt::{self, Write as _};

use iscn_core::{
    chromosome::SexChromosome,
    semantic::{Mosaicism, PloidyModifier},
};

use super::{events::Event, lists::BracketShape};
use crate::span::Spanned;

/// Which of the five body grammars produced a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyVariant {
    /// First or independent clone with its own count and gender.
    Standard,
    /// Clone written relative to the first clone with `idem`.
    Idem,
    /// Stemline of a stemline/sideline row.
    Stemline,
    /// Sideline written relative to the stemline with `sl`.
    StemlineDerived,
    /// Sideline written relative to a previous sideline with `sdl`.
    SidelineDerived,
}

/// Number of chromosomes in a clone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromosomeCount {
    Exact(u32),
    /// `45~48` or `45-48`.
    Range { from: u32, to: u32 },
    /// `?`
    Unknown,
}

impl fmt::Display for ChromosomeCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChromosomeCount::Exact(count) => write!(f, "{count}"),
            ChromosomeCount::Range { from, to } => write!(f, "{from}~{to}"),
            ChromosomeCount::Unknown => f.write_char('?'),
        }
    }
}

/// Ploidy annotation in angle brackets, as in `<3n>` or `<2n+>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalNumber {
    pub level: u32,
    pub modifier: Option<PloidyModifier>,
    pub brackets: BracketShape,
}

impl fmt::Display for ModalNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}n", self.level)?;
        match self.modifier {
            Some(PloidyModifier::Above) => f.write_char('+')?,
            Some(PloidyModifier::Below) => f.write_char('-')?,
            Some(PloidyModifier::AboveOrBelow) => f.write_char('±')?,
            None => {}
        }
        f.write_char('>')
    }
}

/// A run of sex chromosomes such as `XXY`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SexComplement(pub Vec<SexChromosome>);

impl SexComplement {
    pub fn chromosomes(&self) -> &[SexChromosome] {
        &self.0
    }
}

impl fmt::Display for SexComplement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for sex in &self.0 {
            write!(f, "{sex}")?;
        }
        Ok(())
    }
}

/// Sex chromosome complement of a clone, possibly with `/or/` alternatives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gender {
    pub complements: Vec<Spanned<SexComplement>>,
    /// Trailing `c`: the complement is constitutional.
    pub constitutional: bool,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, complement) in self.complements.iter().enumerate() {
            if index > 0 {
                f.write_str("/or/")?;
            }
            write!(f, "{complement}")?;
        }
        if self.constitutional {
            f.write_char('c')?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialKind {
    /// `idem`
    Idem,
    /// `sl`
    Stemline,
    /// `sdl` or `sdl2`
    Sideline(Option<u32>),
}

/// Marker that takes the place of gender in a derived clone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialMarker {
    pub kind: SpecialKind,
    /// `×2` or `x2`, as in `idemx2`.
    pub multiplier: Option<u32>,
}

impl fmt::Display for SpecialMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SpecialKind::Idem => f.write_str("idem")?,
            SpecialKind::Stemline => f.write_str("sl")?,
            SpecialKind::Sideline(None) => f.write_str("sdl")?,
            SpecialKind::Sideline(Some(n)) => write!(f, "sdl{n}")?,
        }
        if let Some(multiplier) = self.multiplier {
            write!(f, "x{multiplier}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Descriptor {
    Gender(Spanned<Gender>),
    Special(Spanned<SpecialMarker>),
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Descriptor::Gender(gender) => gender.fmt(f),
            Descriptor::Special(special) => special.fmt(f),
        }
    }
}

/// How the cell count content was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellNotation {
    /// `[20]`
    Plain,
    /// `[cp20]`
    Composite,
    /// `[20cp]`
    MisplacedComposite,
    /// `[20cells]`; the word is kept as written.
    CellWord(String),
}

/// Number of cells in square brackets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellCount {
    pub count: u32,
    pub notation: CellNotation,
    pub brackets: BracketShape,
}

impl CellCount {
    pub fn is_composite(&self) -> bool {
        matches!(
            self.notation,
            CellNotation::Composite | CellNotation::MisplacedComposite
        )
    }
}

impl fmt::Display for CellCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_composite() {
            write!(f, "[cp{}]", self.count)
        } else {
            write!(f, "[{}]", self.count)
        }
    }
}

/// One karyotype description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KaryotypeBody {
    pub variant: BodyVariant,
    pub mosaicism: Option<Spanned<Mosaicism>>,
    pub count: Option<Spanned<ChromosomeCount>>,
    pub modal: Option<Spanned<ModalNumber>>,
    pub descriptor: Option<Descriptor>,
    pub events: Vec<Spanned<Event>>,
    pub cells: Option<Spanned<CellCount>>,
}

impl KaryotypeBody {
    pub fn gender(&self) -> Option<&Gender> {
        match &self.descriptor {
            Some(Descriptor::Gender(gender)) => Some(gender),
            _ => None,
        }
    }

    pub fn special_marker(&self) -> Option<&SpecialMarker> {
        match &self.descriptor {
            Some(Descriptor::Special(special)) => Some(special),
            _ => None,
        }
    }
}

impl fmt::Display for KaryotypeBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(mosaicism) = &self.mosaicism {
            write!(f, "{mosaicism} ")?;
        }

        let mut comma = false;
        if let Some(count) = &self.count {
            write!(f, "{count}")?;
            comma = true;
        }
        if let Some(modal) = &self.modal {
            write!(f, "{modal}")?;
            comma = true;
        }
        if let Some(descriptor) = &self.descriptor {
            if comma {
                f.write_char(',')?;
            }
            write!(f, "{descriptor}")?;
            comma = true;
        }
        for event in &self.events {
            if comma {
                f.write_char(',')?;
            }
            write!(f, "{event}")?;
            comma = true;
        }
        if let Some(cells) = &self.cells {
            write!(f, "{cells}")?;
        }
        Ok(())
    }
}
