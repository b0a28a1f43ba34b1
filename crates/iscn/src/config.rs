//! Configuration types for karyotype parsing and reporting.
//!
//! All types implement [`serde::Deserialize`] so that they can be loaded
//! from a TOML file; every field has a default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining parser and report settings.
//! - [`ParserConfig`] - Controls strictness, event caching and the input size limit.
//! - [`ReportConfig`] - Selects the [`ReportFormat`] used to print results.
//!
//! # Example
//!
//! ```
//! # use iscn::config::{AppConfig, ReportFormat};
//! let config = AppConfig::default();
//! assert!(!config.parser().strict());
//! assert_eq!(config.report().format(), ReportFormat::Annotations);
//! ```

use std::{fmt, str::FromStr};

use serde::Deserialize;

use iscn_parser::ParseOptions;

/// Top-level configuration combining parser and report settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Parser configuration section.
    #[serde(default)]
    parser: ParserConfig,

    /// Report configuration section.
    #[serde(default)]
    report: ReportConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the given parser and report configurations.
    pub fn new(parser: ParserConfig, report: ReportConfig) -> Self {
        Self { parser, report }
    }

    /// Returns the parser configuration.
    pub fn parser(&self) -> &ParserConfig {
        &self.parser
    }

    /// Returns the report configuration.
    pub fn report(&self) -> &ReportConfig {
        &self.report
    }

    /// Replace the report format, keeping everything else.
    pub fn with_report_format(mut self, format: ReportFormat) -> Self {
        self.report.format = format;
        self
    }
}

/// Parser behaviour.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Treat any diagnostic as an error.
    strict: bool,

    /// Cache event results by position.
    memoize: bool,

    /// Inputs longer than this many bytes are rejected without parsing.
    max_input_length: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        let options = ParseOptions::default();
        Self {
            strict: false,
            memoize: options.memoize,
            max_input_length: options.max_input_length,
        }
    }
}

impl ParserConfig {
    pub fn new(strict: bool, memoize: bool, max_input_length: usize) -> Self {
        Self {
            strict,
            memoize,
            max_input_length,
        }
    }

    /// Returns `true` if corrected input should be reported as an error.
    pub fn strict(&self) -> bool {
        self.strict
    }

    pub fn memoize(&self) -> bool {
        self.memoize
    }

    pub fn max_input_length(&self) -> usize {
        self.max_input_length
    }

    /// The [`ParseOptions`] these settings translate to.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            memoize: self.memoize,
            max_input_length: self.max_input_length,
        }
    }
}

/// How results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// One `<marker>|<message>` line per diagnostic.
    #[default]
    Annotations,
    /// Graphical reports pointing into the karyotype string.
    Pretty,
    /// The structured karyotype summary.
    Summary,
}

impl ReportFormat {
    pub fn name(self) -> &'static str {
        match self {
            ReportFormat::Annotations => "annotations",
            ReportFormat::Pretty => "pretty",
            ReportFormat::Summary => "summary",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "annotations" => Ok(ReportFormat::Annotations),
            "pretty" => Ok(ReportFormat::Pretty),
            "summary" => Ok(ReportFormat::Summary),
            other => Err(format!(
                "unknown report format '{other}', expecting one of: annotations, pretty, summary"
            )),
        }
    }
}

/// Report settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportConfig {
    /// Output format.
    #[serde(default)]
    format: ReportFormat,
}

impl ReportConfig {
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Returns the configured [`ReportFormat`].
    pub fn format(&self) -> ReportFormat {
        self.format
    }
}
