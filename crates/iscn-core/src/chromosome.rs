//! Chromosome identifiers.
//!
//! ISCN refers to chromosomes by number (`1`–`22` in humans, though no range
//! is enforced here), by sex chromosome letter (`X`, `Y`) or as unknown (`?`).

use std::fmt;

use serde::{Serialize, Serializer};

/// One of the two sex chromosomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SexChromosome {
    X,
    Y,
}

impl SexChromosome {
    /// Recognize a sex chromosome letter, ignoring case.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'X' => Some(Self::X),
            'Y' => Some(Self::Y),
            _ => None,
        }
    }

    /// The canonical upper-case letter.
    pub fn letter(self) -> char {
        match self {
            Self::X => 'X',
            Self::Y => 'Y',
        }
    }
}

impl fmt::Display for SexChromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A chromosome named in a karyotype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Chromosome {
    /// A numbered chromosome such as `21`.
    Numbered(u32),
    /// A sex chromosome.
    Sex(SexChromosome),
    /// An unidentified chromosome written `?`.
    Unknown,
}

impl Chromosome {
    /// Returns the sex chromosome this identifier names, if any.
    pub fn sex_chromosome(&self) -> Option<SexChromosome> {
        match self {
            Chromosome::Sex(sex) => Some(*sex),
            _ => None,
        }
    }
}

impl From<SexChromosome> for Chromosome {
    fn from(sex: SexChromosome) -> Self {
        Chromosome::Sex(sex)
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chromosome::Numbered(number) => write!(f, "{number}"),
            Chromosome::Sex(sex) => write!(f, "{sex}"),
            Chromosome::Unknown => write!(f, "?"),
        }
    }
}

impl Serialize for Chromosome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Serialize for SexChromosome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
