//! Semantic model for parsed karyotypes.
//!
//! A [`Karyotype`] is the structured summary of a karyotype row: one
//! [`CloneSummary`] per cell population, carrying what an analyst usually
//! wants to read off a karyotype (chromosome count, sex chromosomes, ploidy,
//! gains, losses and structural aberrations) without walking the parse tree.

use std::fmt;

use serde::Serialize;

use crate::chromosome::{Chromosome, SexChromosome};

/// Population-level marker written before the first clone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mosaicism {
    /// `mos`: cell lines derived from a single zygote.
    Mosaic,
    /// `chi`: cell lines derived from different zygotes.
    Chimera,
}

impl Mosaicism {
    /// The ISCN keyword for this marker.
    pub fn keyword(self) -> &'static str {
        match self {
            Mosaicism::Mosaic => "mos",
            Mosaicism::Chimera => "chi",
        }
    }
}

impl fmt::Display for Mosaicism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// The position a clone takes in a karyotype row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CloneRole {
    /// The first clone of a row.
    First,
    /// A later clone described with its own count and sex chromosomes.
    Independent,
    /// A clone described relative to the first clone (`idem`).
    Idem,
    /// The stemline of a stemline/sideline row.
    Stemline,
    /// A sideline described relative to the stemline (`sl`) or to a previous
    /// sideline (`sdl`).
    Sideline,
}

/// Inclusive chromosome count range; exact counts have `min == max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

impl CountRange {
    /// An exact count.
    pub fn exact(count: u32) -> Self {
        Self {
            min: count,
            max: count,
        }
    }

    /// A range, normalized so that `min <= max`.
    pub fn between(a: u32, b: u32) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Returns `true` if the range covers a single count.
    pub fn is_exact(&self) -> bool {
        self.min == self.max
    }
}

/// Direction of a numerical change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Change {
    Gain,
    Loss,
}

/// Deviation marker after a ploidy level, as in `<3n+>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PloidyModifier {
    Above,
    Below,
    AboveOrBelow,
}

/// Ploidy level taken from a modal number annotation such as `<3n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ploidy {
    pub level: u32,
    pub modifier: Option<PloidyModifier>,
}

impl Ploidy {
    /// Conventional name of the ploidy level.
    pub fn name(&self) -> &'static str {
        match self.level {
            1 => "haploid",
            2 => "diploid",
            3 => "triploid",
            4 => "tetraploid",
            5 => "pentaploid",
            6 => "hexaploid",
            _ => "polyploid",
        }
    }
}

/// A whole-chromosome gain or loss, with the written multiplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CopyChange {
    pub chromosome: Chromosome,
    /// `+8x2` gives 2; 1 when absent.
    pub copies: u32,
}

impl CopyChange {
    pub fn new(chromosome: Chromosome, copies: u32) -> Self {
        Self { chromosome, copies }
    }

    /// A change of one copy.
    pub fn single(chromosome: Chromosome) -> Self {
        Self::new(chromosome, 1)
    }
}

impl fmt::Display for CopyChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.chromosome)?;
        if self.copies > 1 {
            write!(f, "x{}", self.copies)?;
        }
        Ok(())
    }
}

/// A structural aberration reduced to its identifying parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AberrationSummary {
    /// ISCN abbreviation, e.g. `t`, `del`, `der`.
    pub id: String,
    /// Present when the aberration is written with a `+` or `-` prefix.
    pub change: Option<Change>,
    /// Chromosomes involved, in written order.
    pub chromosomes: Vec<Chromosome>,
    /// Breakpoints in canonical text form, e.g. `q34`, `q11.2`.
    pub breakpoints: Vec<String>,
    /// For derivative chromosomes, the rearrangements that produced them.
    pub rearrangements: Vec<AberrationSummary>,
    /// Written multiplication (`x2`); 1 when absent.
    pub copies: u32,
    /// The aberration was questioned (`?`) or names an uncertain chromosome.
    pub uncertain: bool,
}

/// Summary of a single clone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CloneSummary {
    pub ordinal: usize,
    pub role: CloneRole,
    pub chromosome_count: Option<CountRange>,
    /// Written sex chromosome complement, e.g. `XX`; alternatives are joined
    /// with `/or/`.
    pub gender: Option<String>,
    /// Sex chromosomes named by numerical or structural events in the clone.
    pub sex_chromosomes_in_events: Vec<SexChromosome>,
    pub ploidy: Option<Ploidy>,
    pub cells: Option<u32>,
    pub composite: bool,
    pub gains: Vec<CopyChange>,
    pub losses: Vec<CopyChange>,
    pub aberrations: Vec<AberrationSummary>,
    /// Minimum number of marker chromosomes.
    pub markers: u32,
    pub double_minutes: bool,
    pub incomplete: bool,
}

impl CloneSummary {
    /// An empty summary for the clone at `ordinal`.
    pub fn new(ordinal: usize, role: CloneRole) -> Self {
        Self {
            ordinal,
            role,
            chromosome_count: None,
            gender: None,
            sex_chromosomes_in_events: Vec::new(),
            ploidy: None,
            cells: None,
            composite: false,
            gains: Vec::new(),
            losses: Vec::new(),
            aberrations: Vec::new(),
            markers: 0,
            double_minutes: false,
            incomplete: false,
        }
    }

    /// Returns `true` if the clone records no numerical or structural change.
    pub fn is_normal(&self) -> bool {
        self.gains.is_empty()
            && self.losses.is_empty()
            && self.aberrations.is_empty()
            && self.markers == 0
            && !self.double_minutes
    }
}

/// Structured summary of a karyotype row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Karyotype {
    pub mosaicism: Option<Mosaicism>,
    pub clones: Vec<CloneSummary>,
}

impl Karyotype {
    /// Look up a clone by its 1-based ordinal.
    pub fn clone_summary(&self, ordinal: usize) -> Option<&CloneSummary> {
        self.clones.iter().find(|clone| clone.ordinal == ordinal)
    }

    /// Total number of cells counted across all clones.
    pub fn total_cells(&self) -> u32 {
        self.clones.iter().filter_map(|clone| clone.cells).sum()
    }

    /// Returns `true` if the row describes more than one cell population.
    pub fn is_multiclonal(&self) -> bool {
        self.clones.len() > 1
    }
}
