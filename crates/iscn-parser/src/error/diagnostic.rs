//! The core diagnostic type for the karyotype error system.
//!
//! A [`Diagnostic`] represents a single error or warning with optional
//! error code, labeled source spans, and help text.

use std::fmt;

use crate::{
    error::{Severity, error_code::ErrorCode, label::Label},
    span::Span,
};

/// A diagnostic message with source location information.
///
/// Diagnostics carry:
/// - A severity level
/// - An optional error code for documentation and searchability
/// - A message in the fixed wording downstream tools match on
/// - One or more labeled source spans; the primary label's span is the
///   diagnostic's offset and length
/// - Optional help text with suggestions
///
/// # Annotation format
///
/// [`Diagnostic::annotation`] renders the compact `"<marker>|<message>"`
/// form. The marker is the end offset of the primary span (offset plus
/// length), which locates the mistake relative to the start of the string;
/// a rejected karyotype uses `-1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use iscn_parser::error::{Diagnostic, ErrorCode};
    /// # use iscn_parser::Span;
    ///
    /// let diag = Diagnostic::error("This is an incorrect input for karyotype parsing.")
    ///     .with_code(ErrorCode::E203)
    ///     .with_label(Span::new(0..3), "not a karyotype");
    /// assert_eq!(diag.annotation(), "-1|This is an incorrect input for karyotype parsing.");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use iscn_parser::error::Diagnostic;
    /// # use iscn_parser::Span;
    ///
    /// let diag = Diagnostic::warning("Missing gender in clone # 1")
    ///     .with_label(Span::new(0..5), "no sex chromosomes");
    /// assert_eq!(diag.offset(), 0);
    /// assert_eq!(diag.length(), 5);
    /// ```
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get all labels attached to this diagnostic.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// The span of the primary label, if any.
    pub fn span(&self) -> Option<Span> {
        self.labels
            .iter()
            .find(|label| label.is_primary())
            .map(Label::span)
    }

    /// Byte offset of the diagnostic in the karyotype string.
    pub fn offset(&self) -> usize {
        self.span().map_or(0, |span| span.start())
    }

    /// Byte length of the text the diagnostic is about.
    pub fn length(&self) -> usize {
        self.span().map_or(0, |span| span.len())
    }

    /// Position/extent marker used by [`Diagnostic::annotation`].
    pub fn marker(&self) -> i64 {
        if self.severity.is_error() {
            return -1;
        }
        i64::try_from(self.offset() + self.length()).unwrap_or(i64::MAX)
    }

    /// Render the compact `"<marker>|<message>"` form.
    pub fn annotation(&self) -> String {
        format!("{}|{}", self.marker(), self.message)
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Create a new diagnostic with the given severity and message.
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "warning[E300]: message" or "error: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::new(Severity::Error, "test error");

        assert!(diag.severity().is_error());
        assert!(!diag.severity().is_warning());
        assert_eq!(diag.message(), "test error");
        assert!(diag.code().is_none());
        assert!(diag.labels().is_empty());
        assert!(diag.help().is_none());
        assert!(diag.span().is_none());
    }

    #[test]
    fn test_diagnostic_with_code() {
        let diag = Diagnostic::warning("Missing gender in clone # 1").with_code(ErrorCode::E302);

        assert_eq!(diag.code(), Some(ErrorCode::E302));
    }

    #[test]
    fn test_diagnostic_primary_span_drives_offset_and_length() {
        let diag = Diagnostic::warning("Missing '/' before clone # 2 '47,XX'")
            .with_secondary_label(Span::new(0..5), "previous clone")
            .with_label(Span::new(5..10), "clone starts here");

        assert_eq!(diag.labels().len(), 2);
        assert_eq!(diag.offset(), 5);
        assert_eq!(diag.length(), 5);
        assert_eq!(diag.marker(), 10);
    }

    #[test]
    fn test_diagnostic_annotation_for_warning() {
        let diag =
            Diagnostic::warning("Missing a comma before 'XX'").with_label(Span::new(2..4), "here");

        assert_eq!(diag.annotation(), "4|Missing a comma before 'XX'");
    }

    #[test]
    fn test_diagnostic_annotation_for_rejection() {
        let diag = Diagnostic::error("This is an incorrect input for karyotype parsing.")
            .with_label(Span::new(0..7), "here");

        assert_eq!(diag.marker(), -1);
        assert_eq!(
            diag.annotation(),
            "-1|This is an incorrect input for karyotype parsing."
        );
    }

    #[test]
    fn test_diagnostic_with_help() {
        let diag = Diagnostic::warning("Too many commas before 'XY'")
            .with_help("use a single ',' between components");

        assert_eq!(diag.help(), Some("use a single ',' between components"));
    }

    #[test]
    fn test_diagnostic_display_with_code() {
        let diag = Diagnostic::warning("Missing a comma before 'XX'").with_code(ErrorCode::E300);

        assert_eq!(diag.to_string(), "warning[E300]: Missing a comma before 'XX'");
    }

    #[test]
    fn test_diagnostic_display_without_code() {
        let diag = Diagnostic::new(Severity::Error, "rejected");

        assert_eq!(diag.to_string(), "error: rejected");
    }
}
