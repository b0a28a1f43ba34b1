//! Events: numerical changes, structural aberrations and undecoded material.

use std::fmt;

use iscn_core::chromosome::{Chromosome, SexChromosome};

use super::lists::{
    BracketedList, BreakpointsList, ChromosomeList, Location, UncertainChromosome,
};
use crate::span::Spanned;

/// `+` or `-` written before an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Plus,
    Minus,
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sign::Plus => f.write_str("+"),
            Sign::Minus => f.write_str("-"),
        }
    }
}

/// Origin annotation closing an event, as in `+21c` or `t(1;2)(p1;q1)mat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    Constitutional,
    Maternal,
    Paternal,
    DerivedMaternal,
    DerivedPaternal,
    DeNovo,
    Inherited,
}

impl Origin {
    /// Every origin keyword, longest first so that prefix matching is safe.
    pub const ALL: [Origin; 7] = [
        Origin::DerivedMaternal,
        Origin::DerivedPaternal,
        Origin::Maternal,
        Origin::Paternal,
        Origin::Inherited,
        Origin::DeNovo,
        Origin::Constitutional,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Origin::Constitutional => "c",
            Origin::Maternal => "mat",
            Origin::Paternal => "pat",
            Origin::DerivedMaternal => "dmat",
            Origin::DerivedPaternal => "dpat",
            Origin::DeNovo => "dn",
            Origin::Inherited => "inh",
        }
    }
}

/// Optional multiplication and origin written after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Suffix {
    pub multiplier: Option<u32>,
    pub origin: Option<Origin>,
}

impl Suffix {
    pub fn is_empty(&self) -> bool {
        self.multiplier.is_none() && self.origin.is_none()
    }
}

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(multiplier) = self.multiplier {
            write!(f, "x{multiplier}")?;
        }
        if let Some(origin) = self.origin {
            f.write_str(origin.keyword())?;
        }
        Ok(())
    }
}

/// Direction of a whole-chromosome gain or loss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumericalChange {
    Gain,
    Loss,
    /// Both signs were written (`+-` or `-+`); the text is kept as written.
    Undetermined(String),
}

/// Whole-chromosome gain or loss, as in `+21` or `-X`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GainLoss {
    pub change: NumericalChange,
    /// Absent only in the undetermined form, which tolerates a bare sign.
    pub chromosome: Option<Spanned<Chromosome>>,
    pub suffix: Suffix,
}

impl GainLoss {
    pub fn sex_chromosome(&self) -> Option<SexChromosome> {
        self.chromosome.as_ref().and_then(|c| c.sex_chromosome())
    }
}

impl fmt::Display for GainLoss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.change {
            NumericalChange::Gain => f.write_str("+")?,
            NumericalChange::Loss => f.write_str("-")?,
            NumericalChange::Undetermined(sign) => f.write_str(sign)?,
        }
        if let Some(chromosome) = &self.chromosome {
            write!(f, "{chromosome}")?;
        }
        write!(f, "{}", self.suffix)
    }
}

/// Identifier of a basic structural aberration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AberrationId {
    Addition,
    Deletion,
    Duplication,
    Insertion,
    Inversion,
    Fission,
    FragileSite,
    HomogeneouslyStainingRegion,
    Dicentric,
    Isodicentric,
    Ring,
    Isochromosome,
    Translocation,
    TelomericAssociation,
    TricentricChromosome,
    TandemTranslocation,
    Triplication,
    Quadruplication,
    Robertsonian,
    ReciprocalTranslocation,
}

impl AberrationId {
    /// Every basic aberration id, ordered so that no keyword is tried
    /// before a longer keyword it is a prefix of.
    pub const ALL: [AberrationId; 20] = [
        AberrationId::Addition,
        AberrationId::Deletion,
        AberrationId::Duplication,
        AberrationId::Insertion,
        AberrationId::Inversion,
        AberrationId::Fission,
        AberrationId::FragileSite,
        AberrationId::HomogeneouslyStainingRegion,
        AberrationId::Isodicentric,
        AberrationId::Dicentric,
        AberrationId::TelomericAssociation,
        AberrationId::TricentricChromosome,
        AberrationId::TandemTranslocation,
        AberrationId::Triplication,
        AberrationId::Quadruplication,
        AberrationId::Robertsonian,
        AberrationId::ReciprocalTranslocation,
        AberrationId::Ring,
        AberrationId::Isochromosome,
        AberrationId::Translocation,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            AberrationId::Addition => "add",
            AberrationId::Deletion => "del",
            AberrationId::Duplication => "dup",
            AberrationId::Insertion => "ins",
            AberrationId::Inversion => "inv",
            AberrationId::Fission => "fis",
            AberrationId::FragileSite => "fra",
            AberrationId::HomogeneouslyStainingRegion => "hsr",
            AberrationId::Dicentric => "dic",
            AberrationId::Isodicentric => "idic",
            AberrationId::Ring => "r",
            AberrationId::Isochromosome => "i",
            AberrationId::Translocation => "t",
            AberrationId::TelomericAssociation => "tas",
            AberrationId::TricentricChromosome => "trc",
            AberrationId::TandemTranslocation => "tan",
            AberrationId::Triplication => "trp",
            AberrationId::Quadruplication => "qdp",
            AberrationId::Robertsonian => "rob",
            AberrationId::ReciprocalTranslocation => "rcp",
        }
    }
}

impl fmt::Display for AberrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Identifier of a derivative chromosome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DerivativeId {
    Derivative,
    Isoderivative,
    Recombinant,
}

impl DerivativeId {
    pub const ALL: [DerivativeId; 3] = [
        DerivativeId::Derivative,
        DerivativeId::Isoderivative,
        DerivativeId::Recombinant,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            DerivativeId::Derivative => "der",
            DerivativeId::Isoderivative => "ider",
            DerivativeId::Recombinant => "rec",
        }
    }
}

impl fmt::Display for DerivativeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A basic aberration such as `t(9;22)(q34;q11.2)` or `del(5q13q33)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAberration {
    pub prefix: Option<Sign>,
    /// `?` written before the id.
    pub questioned: bool,
    pub id: Spanned<AberrationId>,
    pub location: Location,
    pub suffix: Suffix,
}

impl fmt::Display for BasicAberration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = self.prefix {
            write!(f, "{prefix}")?;
        }
        if self.questioned {
            f.write_str("?")?;
        }
        write!(f, "{}{}{}", self.id, self.location, self.suffix)
    }
}

/// One step in building a derivative chromosome, e.g. `t(9;22)(q34;q11.2)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rearrangement {
    pub id: Spanned<AberrationId>,
    pub location: Location,
}

impl fmt::Display for Rearrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.id, self.location)
    }
}

/// A rearrangement, or several `/or/` alternatives for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RearrangementElement {
    pub alternatives: Vec<Spanned<Rearrangement>>,
}

impl fmt::Display for RearrangementElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_alternatives(f, &self.alternatives)
    }
}

/// A derivative chromosome, as in `der(22)t(9;22)(q34;q11.2)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivativeAberration {
    pub prefix: Option<Sign>,
    pub questioned: bool,
    pub id: Spanned<DerivativeId>,
    pub chromosomes: Spanned<ChromosomeList>,
    pub breakpoints: Option<Spanned<BreakpointsList>>,
    pub rearrangements: Vec<Spanned<RearrangementElement>>,
    pub suffix: Suffix,
}

impl DerivativeAberration {
    pub fn chromosomes(&self) -> Vec<Chromosome> {
        self.chromosomes.readings().map(|c| *c.inner()).collect()
    }
}

impl fmt::Display for DerivativeAberration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = self.prefix {
            write!(f, "{prefix}")?;
        }
        if self.questioned {
            f.write_str("?")?;
        }
        write!(f, "{}", self.id)?;
        self.chromosomes.write_canonical(f, '(', ')')?;
        if let Some(breakpoints) = &self.breakpoints {
            breakpoints.write_canonical(f, '(', ')')?;
        }
        for element in &self.rearrangements {
            write!(f, "{element}")?;
        }
        write!(f, "{}", self.suffix)
    }
}

/// An aberration on a chromosome of uncertain identity, as in `add(?5q)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UncertainAberration {
    pub prefix: Option<Sign>,
    pub id: Spanned<AberrationId>,
    pub chromosome: Spanned<BracketedList<UncertainChromosome>>,
    pub suffix: Suffix,
}

impl fmt::Display for UncertainAberration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = self.prefix {
            write!(f, "{prefix}")?;
        }
        write!(f, "{}", self.id)?;
        self.chromosome.write_canonical(f, '(', ')')?;
        write!(f, "{}", self.suffix)
    }
}

/// A structural aberration.
///
/// The misplaced-comma variants hold a tree identical to their correct
/// counterparts; only the source had a stray comma after the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Aberration {
    Basic(BasicAberration),
    Derivative(DerivativeAberration),
    Uncertain(UncertainAberration),
    BasicMisplacedComma(BasicAberration),
    DerivativeMisplacedComma(DerivativeAberration),
}

impl Aberration {
    /// ISCN abbreviation of the aberration.
    pub fn keyword(&self) -> &'static str {
        match self {
            Aberration::Basic(a) | Aberration::BasicMisplacedComma(a) => a.id.keyword(),
            Aberration::Derivative(a) | Aberration::DerivativeMisplacedComma(a) => {
                a.id.keyword()
            }
            Aberration::Uncertain(a) => a.id.keyword(),
        }
    }

    pub fn prefix(&self) -> Option<Sign> {
        match self {
            Aberration::Basic(a) | Aberration::BasicMisplacedComma(a) => a.prefix,
            Aberration::Derivative(a) | Aberration::DerivativeMisplacedComma(a) => a.prefix,
            Aberration::Uncertain(a) => a.prefix,
        }
    }

    pub fn suffix(&self) -> Suffix {
        match self {
            Aberration::Basic(a) | Aberration::BasicMisplacedComma(a) => a.suffix,
            Aberration::Derivative(a) | Aberration::DerivativeMisplacedComma(a) => a.suffix,
            Aberration::Uncertain(a) => a.suffix,
        }
    }

    /// Chromosomes the aberration names directly.
    pub fn chromosomes(&self) -> Vec<Chromosome> {
        match self {
            Aberration::Basic(a) | Aberration::BasicMisplacedComma(a) => a.location.chromosomes(),
            Aberration::Derivative(a) | Aberration::DerivativeMisplacedComma(a) => {
                a.chromosomes()
            }
            Aberration::Uncertain(a) => a
                .chromosome
                .readings()
                .filter_map(|u| u.chromosome)
                .collect(),
        }
    }

    pub fn has_misplaced_comma(&self) -> bool {
        matches!(
            self,
            Aberration::BasicMisplacedComma(_) | Aberration::DerivativeMisplacedComma(_)
        )
    }
}

impl fmt::Display for Aberration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Aberration::Basic(a) | Aberration::BasicMisplacedComma(a) => a.fmt(f),
            Aberration::Derivative(a) | Aberration::DerivativeMisplacedComma(a) => a.fmt(f),
            Aberration::Uncertain(a) => a.fmt(f),
        }
    }
}

/// Count written before `mar` or `dmin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Count {
    Exact(u32),
    /// `N~M` or `N-M`.
    Range { from: u32, to: u32 },
    /// `~N`, only used with double minutes.
    Approximate(u32),
}

impl Count {
    /// Lowest number of copies the count allows.
    pub fn minimum(&self) -> u32 {
        match *self {
            Count::Exact(n) | Count::Approximate(n) => n,
            Count::Range { from, to } => from.min(to),
        }
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Count::Exact(n) => write!(f, "{n}"),
            Count::Range { from, to } => write!(f, "{from}~{to}"),
            Count::Approximate(n) => write!(f, "~{n}"),
        }
    }
}

/// Material that could not be identified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Undecoded {
    /// Marker chromosomes: `+mar`, `+2mar`, `+mar1`, `+3~5mar`.
    Marker {
        sign: Option<Sign>,
        count: Option<Spanned<Count>>,
        number: Option<u32>,
        suffix: Suffix,
    },
    /// Double minutes: `+dmin`, `12~30dmin`, `~10dmin`.
    DoubleMinute {
        sign: Option<Sign>,
        count: Option<Spanned<Count>>,
    },
}

impl fmt::Display for Undecoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Undecoded::Marker {
                sign,
                count,
                number,
                suffix,
            } => {
                if let Some(sign) = sign {
                    write!(f, "{sign}")?;
                }
                if let Some(count) = count {
                    write!(f, "{count}")?;
                }
                f.write_str("mar")?;
                if let Some(number) = number {
                    write!(f, "{number}")?;
                }
                write!(f, "{suffix}")
            }
            Undecoded::DoubleMinute { sign, count } => {
                if let Some(sign) = sign {
                    write!(f, "{sign}")?;
                }
                if let Some(count) = count {
                    write!(f, "{count}")?;
                }
                f.write_str("dmin")
            }
        }
    }
}

/// A questioned marker, as in `+?mar` or `+?mar1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndecodedSpecial {
    pub sign: Option<Sign>,
    pub number: Option<u32>,
}

impl fmt::Display for UndecodedSpecial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(sign) = self.sign {
            write!(f, "{sign}")?;
        }
        f.write_str("?mar")?;
        if let Some(number) = self.number {
            write!(f, "{number}")?;
        }
        Ok(())
    }
}

/// One interpretation of an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegEventType {
    UndecodedSpecial(UndecodedSpecial),
    Aberration(Aberration),
    Undecoded(Undecoded),
    /// `inc`: the karyotype is incomplete.
    Incomplete,
    GainLoss(GainLoss),
}

impl fmt::Display for RegEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegEventType::UndecodedSpecial(special) => special.fmt(f),
            RegEventType::Aberration(aberration) => aberration.fmt(f),
            RegEventType::Undecoded(undecoded) => undecoded.fmt(f),
            RegEventType::Incomplete => f.write_str("inc"),
            RegEventType::GainLoss(gain_loss) => gain_loss.fmt(f),
        }
    }
}

/// An event with one or more `/or/` interpretations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegEvent {
    pub interpretations: Vec<Spanned<RegEventType>>,
}

impl RegEvent {
    pub fn is_ambiguous(&self) -> bool {
        self.interpretations.len() > 1
    }
}

impl fmt::Display for RegEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_alternatives(f, &self.interpretations)
    }
}

/// Which kind of clone an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Regular,
    Idem,
    Stemline,
    Sideline,
}

/// An event inside a karyotype body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub event: Spanned<RegEvent>,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.event.fmt(f)
    }
}

fn write_alternatives<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    alternatives: &[Spanned<T>],
) -> fmt::Result {
    for (index, alternative) in alternatives.iter().enumerate() {
        if index > 0 {
            f.write_str("/or/")?;
        }
        write!(f, "{alternative}")?;
    }
    Ok(())
}
