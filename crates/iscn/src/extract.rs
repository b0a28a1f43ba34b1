//! Reduce a parse tree to a [`Karyotype`] summary.

use log::trace;

use iscn_core::semantic::{
    AberrationSummary, Change, CloneSummary, CopyChange, CountRange, Karyotype, Mosaicism, Ploidy,
};
use iscn_parser::{
    Row, Spanned, Visitor,
    tree::{
        Aberration, BreakpointGroup, CellCount, ChromosomeCount, GainLoss, Gender, KaryotypeClone,
        Location, ModalNumber, NumericalChange, Rearrangement, Sign, Undecoded, UndecodedSpecial,
    },
};

/// Build the summary of a parsed row.
///
/// Rejected rows summarize to an empty [`Karyotype`].
pub fn summarize(row: &Row) -> Karyotype {
    let mut extractor = SummaryExtractor::default();
    extractor.visit_row(row);
    extractor.karyotype
}

#[derive(Default)]
struct SummaryExtractor {
    karyotype: Karyotype,
    current: Option<CloneSummary>,
}

impl SummaryExtractor {
    fn with_clone(&mut self, update: impl FnOnce(&mut CloneSummary)) {
        if let Some(clone) = self.current.as_mut() {
            update(clone);
        }
    }
}

impl Visitor for SummaryExtractor {
    fn visit_clone(&mut self, clone: &KaryotypeClone) {
        trace!(ordinal = clone.ordinal, role:? = clone.role; "Summarizing clone");

        let mut summary = CloneSummary::new(clone.ordinal, clone.role);
        summary.sex_chromosomes_in_events = clone.sex_chromosomes.to_vec();
        self.current = Some(summary);

        self.visit_body(&clone.body);

        if let Some(summary) = self.current.take() {
            self.karyotype.clones.push(summary);
        }
    }

    fn visit_mosaicism(&mut self, mosaicism: &Spanned<Mosaicism>) {
        self.karyotype.mosaicism.get_or_insert(**mosaicism);
    }

    fn visit_chromosome_count(&mut self, count: &Spanned<ChromosomeCount>) {
        let range = match **count {
            ChromosomeCount::Exact(n) => Some(CountRange::exact(n)),
            ChromosomeCount::Range { from, to } => Some(CountRange::between(from, to)),
            ChromosomeCount::Unknown => None,
        };
        self.with_clone(|clone| clone.chromosome_count = range);
    }

    fn visit_modal_number(&mut self, modal: &Spanned<ModalNumber>) {
        let ploidy = Ploidy {
            level: modal.level,
            modifier: modal.modifier,
        };
        self.with_clone(|clone| clone.ploidy = Some(ploidy));
    }

    fn visit_gender(&mut self, gender: &Spanned<Gender>) {
        let written = gender.to_string();
        self.with_clone(|clone| clone.gender = Some(written));
    }

    fn visit_gain_loss(&mut self, gain_loss: &GainLoss) {
        let Some(chromosome) = gain_loss.chromosome.as_deref().copied() else {
            return;
        };
        let change = CopyChange::new(chromosome, gain_loss.suffix.multiplier.unwrap_or(1).max(1));
        match gain_loss.change {
            NumericalChange::Gain => self.with_clone(|clone| clone.gains.push(change)),
            NumericalChange::Loss => self.with_clone(|clone| clone.losses.push(change)),
            NumericalChange::Undetermined(_) => {}
        }
    }

    fn visit_aberration(&mut self, aberration: &Aberration) {
        let summary = summarize_aberration(aberration);
        self.with_clone(|clone| clone.aberrations.push(summary));
    }

    fn visit_undecoded(&mut self, undecoded: &Undecoded) {
        match undecoded {
            Undecoded::Marker { sign, count, .. } => {
                if *sign == Some(Sign::Minus) {
                    return;
                }
                let markers = count.as_deref().map_or(1, |count| count.minimum());
                self.with_clone(|clone| clone.markers = clone.markers.saturating_add(markers));
            }
            Undecoded::DoubleMinute { .. } => {
                self.with_clone(|clone| clone.double_minutes = true);
            }
        }
    }

    fn visit_undecoded_special(&mut self, special: &UndecodedSpecial) {
        if special.sign != Some(Sign::Minus) {
            self.with_clone(|clone| clone.markers = clone.markers.saturating_add(1));
        }
    }

    fn visit_incomplete(&mut self) {
        self.with_clone(|clone| clone.incomplete = true);
    }

    fn visit_cell_count(&mut self, cells: &Spanned<CellCount>) {
        let count = cells.count;
        let composite = cells.is_composite();
        self.with_clone(|clone| {
            clone.cells = Some(count);
            clone.composite = composite;
        });
    }
}

fn change_of(prefix: Option<Sign>) -> Option<Change> {
    prefix.map(|sign| match sign {
        Sign::Plus => Change::Gain,
        Sign::Minus => Change::Loss,
    })
}

fn location_breakpoints(location: &Location) -> Vec<String> {
    location
        .breakpoints()
        .into_iter()
        .map(ToString::to_string)
        .collect()
}

fn summarize_aberration(aberration: &Aberration) -> AberrationSummary {
    let suffix = aberration.suffix();
    let mut summary = AberrationSummary {
        id: aberration.keyword().to_string(),
        change: change_of(aberration.prefix()),
        chromosomes: aberration.chromosomes(),
        breakpoints: Vec::new(),
        rearrangements: Vec::new(),
        copies: suffix.multiplier.unwrap_or(1),
        uncertain: false,
    };

    match aberration {
        Aberration::Basic(basic) | Aberration::BasicMisplacedComma(basic) => {
            summary.breakpoints = location_breakpoints(&basic.location);
            summary.uncertain = basic.questioned;
        }
        Aberration::Derivative(derivative) | Aberration::DerivativeMisplacedComma(derivative) => {
            summary.breakpoints = derivative
                .breakpoints
                .iter()
                .flat_map(|list| list.readings().flat_map(BreakpointGroup::breakpoints))
                .map(ToString::to_string)
                .collect();
            summary.rearrangements = derivative
                .rearrangements
                .iter()
                .flat_map(|element| element.alternatives.iter())
                .map(|rearrangement| summarize_rearrangement(rearrangement))
                .collect();
            summary.uncertain = derivative.questioned;
        }
        Aberration::Uncertain(uncertain) => {
            summary.breakpoints = uncertain
                .chromosome
                .readings()
                .filter_map(|reading| reading.arm.map(|arm| arm.to_string()))
                .collect();
            summary.uncertain = true;
        }
    }
    summary
}

fn summarize_rearrangement(rearrangement: &Rearrangement) -> AberrationSummary {
    AberrationSummary {
        id: rearrangement.id.keyword().to_string(),
        change: None,
        chromosomes: rearrangement.location.chromosomes(),
        breakpoints: location_breakpoints(&rearrangement.location),
        rearrangements: Vec::new(),
        copies: 1,
        uncertain: false,
    }
}
