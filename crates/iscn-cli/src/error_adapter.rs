//! Error adapter for converting parser diagnostics and [`IscnError`] to
//! miette reports.
//!
//! This module provides the bridge between the library's error types and
//! miette's graphical formatting used by the `pretty` report format and by
//! the CLI's failure output.
//!
//! # Multi-Error Support
//!
//! When a [`iscn::ParseError`] contains multiple diagnostics, each diagnostic
//! is rendered independently.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use iscn::IscnError;
use iscn_parser::{Diagnostic, Severity};

/// Adapter for a single parser diagnostic.
///
/// Wraps a [`Diagnostic`] together with the karyotype it points into.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.diag.severity() {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            let span = span_to_miette(label.span());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// Adapter for [`IscnError`] variants that carry no diagnostics.
pub struct ErrorAdapter<'a>(pub &'a IscnError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            IscnError::Io(_) => "iscn::io",
            IscnError::Parse { .. } => return None,
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A diagnostic with a location in the karyotype.
    Diagnostic(DiagnosticAdapter<'a>),
    /// An error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<miette::Severity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a parser [`Span`](iscn_parser::Span) to a miette [`SourceSpan`].
fn span_to_miette(span: iscn_parser::Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Convert an [`IscnError`] into a list of reportable errors.
///
/// For [`IscnError::Parse`], this returns one [`Reportable`] for each
/// diagnostic in the error. For other variants, a single [`Reportable`].
pub fn to_reportables(err: &IscnError) -> Vec<Reportable<'_>> {
    match err {
        IscnError::Parse {
            err: parse_err,
            src,
        } => parse_err
            .diagnostics()
            .iter()
            .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, src)))
            .collect(),
        IscnError::Io(_) => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

/// Render diagnostics of one karyotype as graphical miette reports.
///
/// # Errors
///
/// Returns [`fmt::Error`] if the report handler fails to write.
pub fn render_diagnostics(diagnostics: &[Diagnostic], src: &str) -> Result<String, fmt::Error> {
    let reporter =
        miette::GraphicalReportHandler::new_themed(miette::GraphicalTheme::unicode_nocolor());
    let mut writer = String::new();
    for diagnostic in diagnostics {
        reporter.render_report(&mut writer, &DiagnosticAdapter::new(diagnostic, src))?;
    }
    Ok(writer)
}

#[cfg(test)]
mod tests {
    use iscn_parser::{ErrorCode, ParseError, Span};

    use super::*;

    #[test]
    fn test_single_diagnostic() {
        let diag = Diagnostic::warning("Missing a comma before 'XX'")
            .with_code(ErrorCode::E300)
            .with_label(Span::new(2..4), "comma inserted here");
        let err = IscnError::new_parse_error(ParseError::from(diag), "46XX");

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);

        match &reportables[0] {
            Reportable::Diagnostic(d) => {
                assert_eq!(d.to_string(), "Missing a comma before 'XX'");
                assert_eq!(d.severity(), Some(miette::Severity::Warning));
            }
            Reportable::Error(_) => panic!("Expected Diagnostic"),
        }
    }

    #[test]
    fn test_multiple_diagnostics() {
        let diags = vec![
            Diagnostic::warning("first")
                .with_code(ErrorCode::E300)
                .with_label(Span::new(0..2), "first"),
            Diagnostic::warning("second")
                .with_code(ErrorCode::E301)
                .with_label(Span::new(3..5), "second")
                .with_help("remove the extra comma"),
        ];
        let err = IscnError::new_parse_error(ParseError::from(diags), "46,,XX");

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 2);
        assert_eq!(reportables[0].to_string(), "first");
        assert_eq!(reportables[1].to_string(), "second");
    }

    #[test]
    fn test_io_error() {
        let err = IscnError::Io(std::io::Error::other("disk on fire"));

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "I/O error: disk on fire");
                assert_eq!(e.code().map(|c| c.to_string()).as_deref(), Some("iscn::io"));
            }
            Reportable::Diagnostic(_) => panic!("Expected Error"),
        }
    }

    #[test]
    fn test_labels_keep_primary_flag() {
        let diag = Diagnostic::error("rejected")
            .with_label(Span::new(0..5), "primary")
            .with_secondary_label(Span::new(1..2), "secondary");

        let adapter = DiagnosticAdapter::new(&diag, "hello");
        let labels: Vec<_> = adapter.labels().unwrap().collect();
        assert_eq!(labels.len(), 2);
        assert!(labels[0].primary());
        assert!(!labels[1].primary());
        assert_eq!(labels[1].label(), Some("secondary"));
    }

    #[test]
    fn test_render_diagnostics_mentions_message() {
        let diag = Diagnostic::warning("Missing a comma before 'XX'")
            .with_code(ErrorCode::E300)
            .with_label(Span::new(2..4), "comma inserted here");

        let rendered = render_diagnostics(std::slice::from_ref(&diag), "46XX").unwrap();
        assert!(rendered.contains("Missing a comma before 'XX'"));
    }
}
