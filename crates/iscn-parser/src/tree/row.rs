//! Rows and clones.

use std::fmt;

use iscn_core::semantic::CloneRole;

use super::body::KaryotypeBody;
use crate::{context::SexChromosomeSet, span::Spanned};

/// How a clone was separated from the one before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloneSeparator {
    /// A single `/`.
    Slant,
    /// Nothing between the two clones.
    Missing,
    /// Two or more `/`; holds the count.
    TooMany(usize),
    /// Any other punctuation run, kept as written.
    Other(String),
}

/// One cell population of a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KaryotypeClone {
    /// 1-based position in the row.
    pub ordinal: usize,
    pub role: CloneRole,
    /// `None` for the first clone of a row.
    pub separator: Option<Spanned<CloneSeparator>>,
    pub body: Spanned<KaryotypeBody>,
    /// Sex chromosomes named by the clone's events.
    pub sex_chromosomes: SexChromosomeSet,
}

impl fmt::Display for KaryotypeClone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.body.fmt(f)
    }
}

/// Clones of a row plus the optional `.` terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneSequence {
    pub clones: Vec<Spanned<KaryotypeClone>>,
    pub terminated: bool,
}

impl fmt::Display for CloneSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, clone) in self.clones.iter().enumerate() {
            if index > 0 {
                f.write_str("/")?;
            }
            write!(f, "{clone}")?;
        }
        if self.terminated {
            f.write_str(".")?;
        }
        Ok(())
    }
}

/// A parsed karyotype string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    /// A first clone followed by independent or `idem` clones.
    Sequence(CloneSequence),
    /// A stemline followed by `sl`/`sdl` sidelines.
    Lineage(CloneSequence),
    /// Input that matches no row shape; the text is kept verbatim.
    Rejected(Spanned<String>),
}

impl Row {
    /// Clones of the row; empty when rejected.
    pub fn clones(&self) -> &[Spanned<KaryotypeClone>] {
        match self {
            Row::Sequence(sequence) | Row::Lineage(sequence) => &sequence.clones,
            Row::Rejected(_) => &[],
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Row::Rejected(_))
    }

    pub fn is_terminated(&self) -> bool {
        match self {
            Row::Sequence(sequence) | Row::Lineage(sequence) => sequence.terminated,
            Row::Rejected(_) => false,
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Row::Sequence(sequence) | Row::Lineage(sequence) => sequence.fmt(f),
            Row::Rejected(text) => text.fmt(f),
        }
    }
}
