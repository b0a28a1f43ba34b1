//! Collector for accumulating diagnostics during parsing.
//!
//! The [`DiagnosticCollector`] lets the parser report every recoverable
//! mistake instead of stopping at the first one. Because the parser
//! backtracks, the collector can be rolled back to an earlier length when an
//! alternative is abandoned.

use crate::error::Diagnostic;

/// A collector for accumulating diagnostics during parsing.
///
/// # Example
///
/// ```text
/// let mut collector = DiagnosticCollector::new();
///
/// let mark = collector.len();
/// collector.emit(Diagnostic::warning("Missing a comma before 'XX'"));
///
/// // The alternative that emitted it failed later on
/// collector.truncate(mark);
/// assert_eq!(collector.len(), 0);
/// ```
#[derive(Debug, Default, Clone)]
pub(crate) struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Emit a diagnostic at an earlier position so that the collected
    /// diagnostics stay in source order.
    pub fn emit_at(&mut self, index: usize, diagnostic: Diagnostic) {
        let index = index.min(self.diagnostics.len());
        self.diagnostics.insert(index, diagnostic);
    }

    /// Number of diagnostics collected so far.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Drop every diagnostic emitted after the collector had `len` entries.
    pub fn truncate(&mut self, len: usize) {
        self.diagnostics.truncate(len);
    }

    /// Diagnostics emitted since the collector had `len` entries.
    pub fn since(&self, len: usize) -> &[Diagnostic] {
        self.diagnostics.get(len..).unwrap_or_default()
    }

    /// Consume the collector and return every diagnostic.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl Extend<Diagnostic> for DiagnosticCollector {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        self.diagnostics.extend(iter);
    }
}
