//! Read-only traversal of the parse tree using the visitor pattern.
//!
//! Consumers that extract structured data from a karyotype (counts, sex
//! chromosomes, aberrations) implement [`Visitor`] and override only the
//! methods they care about.

use crate::{
    span::Spanned,
    tree::{
        Aberration, CellCount, ChromosomeCount, CloneSequence, Descriptor, DerivativeAberration,
        Event, EventKind, GainLoss, Gender, KaryotypeBody, KaryotypeClone, ModalNumber,
        RegEventType, Rearrangement, Row, SpecialMarker, Undecoded, UndecodedSpecial,
    },
};
use iscn_core::semantic::Mosaicism;

/// Visitor trait for traversing parse tree nodes.
///
/// Default implementations perform recursive traversal so implementors can
/// override only the methods they care about.
pub trait Visitor {
    /// Visit a complete row
    fn visit_row(&mut self, row: &Row) {
        match row {
            Row::Sequence(sequence) | Row::Lineage(sequence) => self.visit_sequence(sequence),
            Row::Rejected(text) => self.visit_rejected(text),
        }
    }

    fn visit_sequence(&mut self, sequence: &CloneSequence) {
        for clone in &sequence.clones {
            self.visit_clone(clone);
        }
    }

    /// Visit input that matched no row shape
    fn visit_rejected(&mut self, _text: &Spanned<String>) {}

    /// Visit a single clone
    fn visit_clone(&mut self, clone: &KaryotypeClone) {
        self.visit_body(&clone.body);
    }

    /// Visit a karyotype body, in written order
    fn visit_body(&mut self, body: &KaryotypeBody) {
        if let Some(mosaicism) = &body.mosaicism {
            self.visit_mosaicism(mosaicism);
        }
        if let Some(count) = &body.count {
            self.visit_chromosome_count(count);
        }
        if let Some(modal) = &body.modal {
            self.visit_modal_number(modal);
        }
        match &body.descriptor {
            Some(Descriptor::Gender(gender)) => self.visit_gender(gender),
            Some(Descriptor::Special(special)) => self.visit_special_marker(special),
            None => {}
        }
        for event in &body.events {
            self.visit_event(event);
        }
        if let Some(cells) = &body.cells {
            self.visit_cell_count(cells);
        }
    }

    fn visit_mosaicism(&mut self, _mosaicism: &Spanned<Mosaicism>) {}

    fn visit_chromosome_count(&mut self, _count: &Spanned<ChromosomeCount>) {}

    fn visit_modal_number(&mut self, _modal: &Spanned<ModalNumber>) {}

    fn visit_gender(&mut self, _gender: &Spanned<Gender>) {}

    fn visit_special_marker(&mut self, _special: &Spanned<SpecialMarker>) {}

    /// Visit an event and each of its interpretations
    fn visit_event(&mut self, event: &Event) {
        for interpretation in &event.event.interpretations {
            self.visit_event_type(event.kind, interpretation);
        }
    }

    /// Visit one interpretation of an event
    fn visit_event_type(&mut self, _kind: EventKind, event: &RegEventType) {
        match event {
            RegEventType::UndecodedSpecial(special) => self.visit_undecoded_special(special),
            RegEventType::Aberration(aberration) => self.visit_aberration(aberration),
            RegEventType::Undecoded(undecoded) => self.visit_undecoded(undecoded),
            RegEventType::Incomplete => self.visit_incomplete(),
            RegEventType::GainLoss(gain_loss) => self.visit_gain_loss(gain_loss),
        }
    }

    fn visit_gain_loss(&mut self, _gain_loss: &GainLoss) {}

    fn visit_aberration(&mut self, aberration: &Aberration) {
        if let Aberration::Derivative(derivative)
        | Aberration::DerivativeMisplacedComma(derivative) = aberration
        {
            self.visit_derivative(derivative);
        }
    }

    /// Visit the rearrangements that make up a derivative chromosome
    fn visit_derivative(&mut self, derivative: &DerivativeAberration) {
        for element in &derivative.rearrangements {
            for rearrangement in &element.alternatives {
                self.visit_rearrangement(rearrangement);
            }
        }
    }

    fn visit_rearrangement(&mut self, _rearrangement: &Rearrangement) {}

    fn visit_undecoded(&mut self, _undecoded: &Undecoded) {}

    fn visit_undecoded_special(&mut self, _special: &UndecodedSpecial) {}

    fn visit_incomplete(&mut self) {}

    fn visit_cell_count(&mut self, _cells: &Spanned<CellCount>) {}
}
