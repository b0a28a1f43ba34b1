//! Mutable state threaded through a single parse.
//!
//! The grammar needs two pieces of cross-rule state: the ordinal of the clone
//! being parsed (diagnostics name it) and the set of sex chromosomes named by
//! the clone's events (which decides whether a clone without an explicit
//! gender is reported). Both live in [`ParseContext`], which the parser
//! snapshots before every alternative and restores on backtrack.

use indexmap::IndexSet;

use iscn_core::chromosome::SexChromosome;

/// Sex chromosomes named by the events of the current clone.
///
/// Insertion order is kept so summaries list chromosomes as written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SexChromosomeSet {
    seen: IndexSet<SexChromosome>,
}

impl SexChromosomeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sex chromosome; returns `true` if it was not yet present.
    pub fn insert(&mut self, sex: SexChromosome) -> bool {
        self.seen.insert(sex)
    }

    pub fn contains(&self, sex: SexChromosome) -> bool {
        self.seen.contains(&sex)
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn clear(&mut self) {
        self.seen.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = SexChromosome> + '_ {
        self.seen.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<SexChromosome> {
        self.iter().collect()
    }
}

impl FromIterator<SexChromosome> for SexChromosomeSet {
    fn from_iter<T: IntoIterator<Item = SexChromosome>>(iter: T) -> Self {
        Self {
            seen: iter.into_iter().collect(),
        }
    }
}

/// Explicit parse state: clone ordinal and sex chromosome bookkeeping.
#[derive(Debug, Clone, Default)]
pub(crate) struct ParseContext {
    clone_ordinal: usize,
    sex_chromosomes: SexChromosomeSet,
    /// Every sex chromosome noted during the parse, in order, duplicates
    /// included. Memoized events replay their slice of this log.
    noted: Vec<SexChromosome>,
}

impl ParseContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter the next clone: bump the ordinal and reset the set.
    pub fn begin_clone(&mut self) -> usize {
        self.clone_ordinal += 1;
        self.sex_chromosomes.clear();
        self.clone_ordinal
    }

    /// Ordinal (1-based) of the clone being parsed.
    pub fn clone_ordinal(&self) -> usize {
        self.clone_ordinal
    }

    pub fn note_sex_chromosome(&mut self, sex: SexChromosome) {
        self.sex_chromosomes.insert(sex);
        self.noted.push(sex);
    }

    pub fn sex_chromosomes(&self) -> &SexChromosomeSet {
        &self.sex_chromosomes
    }

    /// Length of the noted-chromosome log, for later [`Self::noted_since`].
    pub fn noted_len(&self) -> usize {
        self.noted.len()
    }

    pub fn noted_since(&self, len: usize) -> &[SexChromosome] {
        self.noted.get(len..).unwrap_or_default()
    }

    /// Capture the state needed to undo everything after this point.
    pub fn snapshot(&self) -> ContextSnapshot {
        ContextSnapshot {
            clone_ordinal: self.clone_ordinal,
            sex_chromosomes: self.sex_chromosomes.clone(),
            noted_len: self.noted.len(),
        }
    }

    pub fn restore(&mut self, snapshot: ContextSnapshot) {
        self.clone_ordinal = snapshot.clone_ordinal;
        self.sex_chromosomes = snapshot.sex_chromosomes;
        self.noted.truncate(snapshot.noted_len);
    }
}

/// Saved [`ParseContext`] state, taken before trying an alternative.
#[derive(Debug, Clone)]
pub(crate) struct ContextSnapshot {
    clone_ordinal: usize,
    sex_chromosomes: SexChromosomeSet,
    noted_len: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_clone_resets_sex_chromosomes() {
        let mut context = ParseContext::new();
        assert_eq!(context.begin_clone(), 1);
        context.note_sex_chromosome(SexChromosome::X);
        assert!(context.sex_chromosomes().contains(SexChromosome::X));

        assert_eq!(context.begin_clone(), 2);
        assert!(context.sex_chromosomes().is_empty());
        assert_eq!(context.clone_ordinal(), 2);
    }

    #[test]
    fn test_noted_log_keeps_duplicates() {
        let mut context = ParseContext::new();
        context.begin_clone();
        let mark = context.noted_len();
        context.note_sex_chromosome(SexChromosome::X);
        context.note_sex_chromosome(SexChromosome::X);
        context.note_sex_chromosome(SexChromosome::Y);

        assert_eq!(context.sex_chromosomes().len(), 2);
        assert_eq!(
            context.noted_since(mark),
            &[SexChromosome::X, SexChromosome::X, SexChromosome::Y]
        );
    }

    #[test]
    fn test_restore_undoes_later_changes() {
        let mut context = ParseContext::new();
        context.begin_clone();
        context.note_sex_chromosome(SexChromosome::Y);
        let snapshot = context.snapshot();

        context.begin_clone();
        context.note_sex_chromosome(SexChromosome::X);
        context.restore(snapshot);

        assert_eq!(context.clone_ordinal(), 1);
        assert_eq!(context.sex_chromosomes().to_vec(), vec![SexChromosome::Y]);
        assert_eq!(context.noted_len(), 1);
    }

    #[test]
    fn test_sex_chromosome_set_preserves_order() {
        let set: SexChromosomeSet = [SexChromosome::Y, SexChromosome::X, SexChromosome::Y]
            .into_iter()
            .collect();
        assert_eq!(set.to_vec(), vec![SexChromosome::Y, SexChromosome::X]);
    }
}
