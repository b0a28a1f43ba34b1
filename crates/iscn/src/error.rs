//! Error types for karyotype processing.
//!
//! [`IscnError`] wraps the ways a karyotype can fail to turn into an
//! [`Analysis`](crate::Analysis).

use std::io;

use thiserror::Error;

use iscn_parser::error::ParseError;

/// The main error type for karyotype processing.
///
/// The `Parse` variant keeps the karyotype string next to its diagnostics so
/// that reports can point into it.
#[derive(Debug, Error)]
pub enum IscnError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },
}

impl IscnError {
    /// Create a new `Parse` error with the associated karyotype string.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }

    /// Returns `true` if the karyotype matched no row shape at all.
    pub fn is_rejection(&self) -> bool {
        match self {
            IscnError::Parse { err, .. } => err.is_rejection(),
            IscnError::Io(_) => false,
        }
    }
}
