//! Labeled source spans for diagnostic messages.
//!
//! A label associates a message with a span in the karyotype string.

use crate::span::Span;

/// A labeled span in the karyotype string.
///
/// The primary label marks the text a diagnostic is about, e.g. the `XX` in
/// `46XX`. Secondary labels point at related text such as the previous clone.
///
/// # Example
///
/// ```text
/// warning[E300]: Missing a comma before 'XX'
///    |
///  1 | 46XX
///    |   ^^ expected ',' before the sex chromosomes
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    span: Span,
    message: String,
    is_primary: bool,
}

impl Label {
    /// Create a new primary label.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a new secondary label.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: false,
        }
    }

    /// Get the span this label applies to.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Get the label message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check if this is a primary label.
    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    /// Check if this is a secondary label.
    pub fn is_secondary(&self) -> bool {
        !self.is_primary
    }
}
