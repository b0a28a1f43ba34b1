//! Parse tree for karyotype strings.
//!
//! The tree is a closed set of node types built bottom-up by the parser and
//! never mutated afterwards. Nodes that point back into the source are wrapped
//! in [`Spanned`](crate::Spanned); equality ignores spans, so two trees compare
//! equal when they describe the same karyotype.
//!
//! Every node implements [`Display`](std::fmt::Display) and prints canonical
//! ISCN: correct brackets, `;` list separators, single commas and `/`
//! between clones. Re-parsing the printed form of a tree that produced no
//! diagnostics yields an equal tree.

mod body;
mod events;
mod lists;
mod row;

pub use body::{
    BodyVariant, CellCount, CellNotation, ChromosomeCount, Descriptor, Gender, KaryotypeBody,
    ModalNumber, SexComplement, SpecialKind, SpecialMarker,
};
pub use events::{
    Aberration, AberrationId, BasicAberration, Count, DerivativeAberration, DerivativeId, Event,
    EventKind, GainLoss, NumericalChange, Origin, RegEvent, RegEventType, Rearrangement,
    RearrangementElement, Sign, Suffix, UncertainAberration, Undecoded, UndecodedSpecial,
};
pub use lists::{
    Arm, Band, BracketShape, BracketedList, Breakpoint, BreakpointGroup, BreakpointsList,
    ChromosomeList, Designation, DetailedBreakpointsList, DetailedEntry, ListElement, Location,
    Segment, SeparatorShape, UncertainChromosome,
};
pub use row::{CloneSequence, CloneSeparator, KaryotypeClone, Row};
