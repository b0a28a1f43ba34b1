//! ISCN - parse karyotype strings written in the International System for
//! Human Cytogenomic Nomenclature.
//!
//! [`KaryotypeParser`] runs the error-tolerant parser over a karyotype,
//! keeps the tree and its diagnostics, and reduces the tree to a
//! [`Karyotype`](semantic::Karyotype) summary.

pub mod config;

mod error;
mod extract;

pub use iscn_core::{chromosome, semantic};
pub use iscn_parser::{Diagnostic, ErrorCode, ParseError, Row, Severity, Span, tree};

pub use error::IscnError;

use log::{debug, info, trace};

use config::AppConfig;
use semantic::Karyotype;

/// Everything known about one parsed karyotype.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// The parse tree; prints as canonical ISCN.
    pub row: Row,
    /// Corrections made while parsing, in the order they were found.
    pub diagnostics: Vec<Diagnostic>,
    pub karyotype: Karyotype,
}

impl Analysis {
    /// Returns `true` if the karyotype needed no correction.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Diagnostics in their compact `"<marker>|<message>"` form.
    pub fn annotations(&self) -> Vec<String> {
        self.diagnostics.iter().map(Diagnostic::annotation).collect()
    }

    /// The karyotype in canonical form.
    pub fn normalized(&self) -> String {
        self.row.to_string()
    }
}

/// Parses karyotype strings according to an [`AppConfig`].
///
/// # Examples
///
/// ```rust
/// use iscn::{KaryotypeParser, config::AppConfig};
///
/// let parser = KaryotypeParser::new(AppConfig::default());
/// let analysis = parser.parse("47,XY,+21").expect("Failed to parse");
///
/// assert!(analysis.is_clean());
/// assert_eq!(analysis.karyotype.clones.len(), 1);
///
/// // Or use the default config
/// let parser = KaryotypeParser::default();
/// ```
#[derive(Debug, Default)]
pub struct KaryotypeParser {
    config: AppConfig,
}

impl KaryotypeParser {
    /// Create a new parser with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration the parser was built with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a karyotype string and summarize it.
    ///
    /// Recoverable mistakes are corrected and reported in
    /// [`Analysis::diagnostics`].
    ///
    /// # Errors
    ///
    /// Returns [`IscnError::Parse`] when the karyotype matches no row shape,
    /// or, with `parser.strict` set, when it needed any correction.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use iscn::KaryotypeParser;
    ///
    /// let analysis = KaryotypeParser::default().parse("46XX").expect("Failed to parse");
    /// assert_eq!(analysis.normalized(), "46,XX");
    /// assert_eq!(analysis.annotations(), vec!["4|Missing a comma before 'XX'"]);
    /// ```
    pub fn parse(&self, source: &str) -> Result<Analysis, IscnError> {
        info!(length = source.len(); "Parsing karyotype");

        let parser_config = self.config.parser();
        let outcome = iscn_parser::parse(source, &parser_config.parse_options());

        if outcome.is_rejected() || (parser_config.strict() && !outcome.is_clean()) {
            debug!(
                diagnostics = outcome.diagnostics.len(),
                rejected = outcome.is_rejected();
                "Karyotype not accepted"
            );
            return Err(IscnError::new_parse_error(
                ParseError::new(outcome.diagnostics),
                source,
            ));
        }
        debug!(diagnostics = outcome.diagnostics.len(); "Karyotype parsed");

        let karyotype = extract::summarize(&outcome.row);
        debug!(clones = karyotype.clones.len(); "Karyotype summarized");
        trace!(karyotype:?; "Karyotype summary");

        Ok(Analysis {
            row: outcome.row,
            diagnostics: outcome.diagnostics,
            karyotype,
        })
    }
}
