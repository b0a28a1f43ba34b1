//! Bracketed lists, chromosome lists and breakpoints.

use std::fmt::{self, Write as _};

use iscn_core::chromosome::{Chromosome, SexChromosome};

use crate::span::Spanned;

/// How a bracketed list was delimited in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketShape {
    /// Opened and closed with the expected pair.
    Correct,
    MissingOpen,
    MissingClose,
    /// Written with no brackets at all.
    MissingBoth,
    /// Delimited with bracket characters other than the expected pair.
    Wrong { open: char, close: char },
}

impl BracketShape {
    pub fn is_correct(&self) -> bool {
        matches!(self, BracketShape::Correct)
    }
}

/// How list elements were separated in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeparatorShape {
    /// `;` between every pair of elements (or a single element).
    Correct,
    /// At least one `,` or `:` where `;` was expected.
    Incorrect,
}

/// One list position: a single reading, or several readings joined by `::`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListElement<E> {
    Single(E),
    Ambiguous(Vec<E>),
}

impl<E> ListElement<E> {
    /// All readings of this element.
    pub fn readings(&self) -> &[E] {
        match self {
            ListElement::Single(element) => std::slice::from_ref(element),
            ListElement::Ambiguous(elements) => elements,
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, ListElement::Ambiguous(_))
    }
}

impl<E: fmt::Display> fmt::Display for ListElement<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, reading) in self.readings().iter().enumerate() {
            if index > 0 {
                f.write_str("::")?;
            }
            write!(f, "{reading}")?;
        }
        Ok(())
    }
}

/// A bracketed, `;`-separated list together with how it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketedList<E> {
    pub brackets: BracketShape,
    pub separators: SeparatorShape,
    pub elements: Vec<ListElement<E>>,
}

impl<E> BracketedList<E> {
    /// Every reading of every element, in order.
    pub fn readings(&self) -> impl Iterator<Item = &E> {
        self.elements.iter().flat_map(|element| element.readings())
    }

    /// Returns `true` if both brackets and separators were written correctly.
    pub fn is_well_formed(&self) -> bool {
        self.brackets.is_correct() && self.separators == SeparatorShape::Correct
    }

    /// Write the canonical form using the given bracket pair.
    pub fn write_canonical(&self, f: &mut fmt::Formatter<'_>, open: char, close: char) -> fmt::Result
    where
        E: fmt::Display,
    {
        f.write_char(open)?;
        for (index, element) in self.elements.iter().enumerate() {
            if index > 0 {
                f.write_char(';')?;
            }
            write!(f, "{element}")?;
        }
        f.write_char(close)
    }
}

/// Chromosome arm, or the centromere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arm {
    P,
    Q,
    Centromere,
}

impl fmt::Display for Arm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arm::P => f.write_str("p"),
            Arm::Q => f.write_str("q"),
            Arm::Centromere => f.write_str("cen"),
        }
    }
}

/// A band or subband number, optionally a `~`/`-` range.
///
/// Values keep their written digits (including `?`), so `q11.2` and `q11.20`
/// stay distinct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Designation {
    pub value: String,
    pub range_to: Option<String>,
}

impl Designation {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            range_to: None,
        }
    }

    pub fn is_uncertain(&self) -> bool {
        self.value.contains('?') || self.range_to.as_deref().is_some_and(|v| v.contains('?'))
    }
}

impl fmt::Display for Designation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)?;
        if let Some(to) = &self.range_to {
            write!(f, "~{to}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Band {
    Numbered(Designation),
    /// `ter`, the end of the arm.
    Terminal,
    /// Arm only, as in `del(5q)`.
    Unspecified,
}

/// A chromosome breakpoint such as `q11.2`, `pter` or `cen`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakpoint {
    pub arm: Arm,
    pub band: Band,
    pub subband: Option<Designation>,
}

impl Breakpoint {
    pub fn arm_only(arm: Arm) -> Self {
        Self {
            arm,
            band: Band::Unspecified,
            subband: None,
        }
    }

    pub fn centromere() -> Self {
        Self::arm_only(Arm::Centromere)
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.arm)?;
        match &self.band {
            Band::Numbered(band) => write!(f, "{band}")?,
            Band::Terminal => f.write_str("ter")?,
            Band::Unspecified => {}
        }
        if let Some(subband) = &self.subband {
            write!(f, ".{subband}")?;
        }
        Ok(())
    }
}

/// `from->to` part of a detailed breakpoint description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub from: Spanned<Breakpoint>,
    pub to: Option<Spanned<Breakpoint>>,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.from)?;
        if let Some(to) = &self.to {
            write!(f, "->{to}")?;
        }
        Ok(())
    }
}

/// Breakpoints belonging to one chromosome of an aberration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreakpointGroup {
    /// Short form, e.g. `q13q33`.
    Simple(Vec<Spanned<Breakpoint>>),
    /// Detailed form, e.g. `pter->q13::q33->qter`.
    Detailed(Vec<Segment>),
}

impl BreakpointGroup {
    pub fn breakpoints(&self) -> Vec<&Breakpoint> {
        match self {
            BreakpointGroup::Simple(breakpoints) => {
                breakpoints.iter().map(|b| b.inner()).collect()
            }
            BreakpointGroup::Detailed(segments) => segments
                .iter()
                .flat_map(|segment| std::iter::once(&segment.from).chain(segment.to.as_ref()))
                .map(|b| b.inner())
                .collect(),
        }
    }
}

impl fmt::Display for BreakpointGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreakpointGroup::Simple(breakpoints) => {
                for breakpoint in breakpoints {
                    write!(f, "{breakpoint}")?;
                }
            }
            BreakpointGroup::Detailed(segments) => {
                for (index, segment) in segments.iter().enumerate() {
                    if index > 0 {
                        f.write_str("::")?;
                    }
                    write!(f, "{segment}")?;
                }
            }
        }
        Ok(())
    }
}

/// Chromosome and breakpoints written inside one bracket, as in `5q13q33`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailedEntry {
    pub chromosome: Spanned<Chromosome>,
    pub breakpoints: Vec<Spanned<Breakpoint>>,
}

impl fmt::Display for DetailedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.chromosome)?;
        for breakpoint in &self.breakpoints {
            write!(f, "{breakpoint}")?;
        }
        Ok(())
    }
}

/// A chromosome whose identity is in doubt, as in `?5`, `?q` or `?5q`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UncertainChromosome {
    pub chromosome: Option<Chromosome>,
    pub arm: Option<Arm>,
}

impl fmt::Display for UncertainChromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('?')?;
        if let Some(chromosome) = &self.chromosome {
            write!(f, "{chromosome}")?;
        }
        if let Some(arm) = &self.arm {
            write!(f, "{arm}")?;
        }
        Ok(())
    }
}

pub type ChromosomeList = BracketedList<Spanned<Chromosome>>;
pub type BreakpointsList = BracketedList<BreakpointGroup>;
pub type DetailedBreakpointsList = BracketedList<DetailedEntry>;

/// Where an aberration happens: separate chromosome and breakpoint lists,
/// or both folded into one bracket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Lists {
        chromosomes: Spanned<ChromosomeList>,
        breakpoints: Option<Spanned<BreakpointsList>>,
    },
    Detailed(Spanned<DetailedBreakpointsList>),
}

impl Location {
    /// Chromosomes involved, in written order.
    pub fn chromosomes(&self) -> Vec<Chromosome> {
        match self {
            Location::Lists { chromosomes, .. } => {
                chromosomes.readings().map(|c| *c.inner()).collect()
            }
            Location::Detailed(list) => list.readings().map(|e| *e.chromosome.inner()).collect(),
        }
    }

    /// Breakpoints, in written order, regardless of notation.
    pub fn breakpoints(&self) -> Vec<&Breakpoint> {
        match self {
            Location::Lists { breakpoints, .. } => breakpoints
                .iter()
                .flat_map(|list| list.readings())
                .flat_map(BreakpointGroup::breakpoints)
                .collect(),
            Location::Detailed(list) => list
                .readings()
                .flat_map(|entry| entry.breakpoints.iter().map(|b| b.inner()))
                .collect(),
        }
    }

    /// Sex chromosomes named by this location.
    pub fn sex_chromosomes(&self) -> Vec<SexChromosome> {
        self.chromosomes()
            .iter()
            .filter_map(Chromosome::sex_chromosome)
            .collect()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Lists {
                chromosomes,
                breakpoints,
            } => {
                chromosomes.write_canonical(f, '(', ')')?;
                if let Some(breakpoints) = breakpoints {
                    breakpoints.write_canonical(f, '(', ')')?;
                }
                Ok(())
            }
            Location::Detailed(list) => list.write_canonical(f, '(', ')'),
        }
    }
}
