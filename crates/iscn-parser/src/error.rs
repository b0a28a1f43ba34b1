//! Error and diagnostic system for the karyotype parser.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Labeled spans anchored in the karyotype string
//! - Severity levels
//! - A rollback-aware collector for the backtracking parser
//!
//! # Overview
//!
//! Parsing a karyotype never fails: recoverable authoring mistakes are
//! reported as [`Severity::Warning`] diagnostics next to a best-effort tree,
//! and only a string the parser cannot recognize at all yields a single
//! [`Severity::Error`] diagnostic. [`ParseError`] wraps diagnostics for
//! callers that want to treat them as a failure.
//!
//! # Example
//!
//! ```
//! # use iscn_parser::error::{Diagnostic, ErrorCode};
//! # use iscn_parser::Span;
//!
//! let diag = Diagnostic::warning("Missing a comma before 'XX'")
//!     .with_code(ErrorCode::E300)
//!     .with_label(Span::new(2..4), "expected ',' here")
//!     .with_help("separate the chromosome count from the sex chromosomes with ','");
//!
//! assert_eq!(diag.annotation(), "4|Missing a comma before 'XX'");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
