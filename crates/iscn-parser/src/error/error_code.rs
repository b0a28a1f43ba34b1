//! Error codes for the karyotype diagnostic system.
//!
//! Error codes are organized by grammar layer:
//! - `E1xx` - Bracketed lists and their separators
//! - `E2xx` - Clone separation and whole-row rejection
//! - `E3xx` - Karyotype bodies (count, sex chromosomes, special markers)
//! - `E4xx` - Events and cell counts

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // List Errors (E1xx)
    // =========================================================================
    /// Missing opening bracket.
    ///
    /// A list was closed but never opened, as in `del5)(q13)`.
    E100,

    /// Missing closing bracket.
    ///
    /// A list was opened but never closed, as in `t(9;22(q34;q11.2)`.
    E101,

    /// Missing brackets.
    ///
    /// List elements were written without any brackets, as in `del5(q13)`.
    E102,

    /// Wrong bracket format.
    ///
    /// A list used the wrong bracket characters, as in `del[5](q13)`.
    E103,

    /// Incorrect list separators.
    ///
    /// List elements were separated by `,` or `:` instead of `;`.
    E104,

    // =========================================================================
    // Clone Errors (E2xx)
    // =========================================================================
    /// Missing clone separator.
    ///
    /// Two clones were written back to back without `/`.
    E200,

    /// Too many clone separators.
    ///
    /// Clones were separated by more than one `/`.
    E201,

    /// Incorrect clone separation.
    ///
    /// Clones were separated by punctuation other than `/`.
    E202,

    /// Unrecognized karyotype.
    ///
    /// The string could not be parsed as a karyotype at all.
    E203,

    // =========================================================================
    // Body Errors (E3xx)
    // =========================================================================
    /// Missing comma.
    ///
    /// A component of the karyotype was not preceded by `,`.
    E300,

    /// Too many commas.
    ///
    /// A component of the karyotype was preceded by more than one `,`.
    E301,

    /// Missing gender.
    ///
    /// A clone states a chromosome count but no sex chromosomes, and none of
    /// its events name `X` or `Y`.
    E302,

    /// Missing chromosome number.
    ///
    /// A clone does not start with a chromosome count.
    E303,

    /// Missing chromosome number and gender.
    ///
    /// A clone consists of events only.
    E304,

    // =========================================================================
    // Event Errors (E4xx)
    // =========================================================================
    /// Undetermined prefix.
    ///
    /// A numerical change was written with both `+` and `-`.
    E400,

    /// Misplaced comma.
    ///
    /// An aberration contains a comma between its id and its lists.
    E401,

    /// Incorrect composite karyotype notation.
    ///
    /// A cell count was written `[20cp]` instead of `[cp20]`.
    E402,

    /// Superfluous cell word.
    ///
    /// A cell count was written `[20 cells]` instead of `[20]`.
    E403,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            // List errors
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E104 => "E104",
            // Clone errors
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            // Body errors
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
            ErrorCode::E302 => "E302",
            ErrorCode::E303 => "E303",
            ErrorCode::E304 => "E304",
            // Event errors
            ErrorCode::E400 => "E400",
            ErrorCode::E401 => "E401",
            ErrorCode::E402 => "E402",
            ErrorCode::E403 => "E403",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            // List errors
            ErrorCode::E100 => "missing opening bracket",
            ErrorCode::E101 => "missing closing bracket",
            ErrorCode::E102 => "missing brackets",
            ErrorCode::E103 => "wrong bracket format",
            ErrorCode::E104 => "incorrect list separators",
            // Clone errors
            ErrorCode::E200 => "missing clone separator",
            ErrorCode::E201 => "too many clone separators",
            ErrorCode::E202 => "incorrect clone separation",
            ErrorCode::E203 => "unrecognized karyotype",
            // Body errors
            ErrorCode::E300 => "missing comma",
            ErrorCode::E301 => "too many commas",
            ErrorCode::E302 => "missing gender",
            ErrorCode::E303 => "missing chromosome number",
            ErrorCode::E304 => "missing chromosome number and gender",
            // Event errors
            ErrorCode::E400 => "undetermined prefix",
            ErrorCode::E401 => "misplaced comma",
            ErrorCode::E402 => "incorrect composite karyotype notation",
            ErrorCode::E403 => "superfluous cell word",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
