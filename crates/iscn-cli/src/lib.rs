//! CLI logic for the ISCN karyotype annotator.
//!
//! Reads karyotypes, one per line, and prints each in canonical form
//! followed by its diagnostics or summary.

pub mod error_adapter;

mod args;
mod config;
mod report;

pub use args::Args;

use std::{
    fs,
    io::{self, Write},
};

use log::{debug, info, warn};

use iscn::{IscnError, KaryotypeParser};

/// Outcome of a CLI run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStatus {
    /// Karyotypes read.
    pub processed: usize,
    /// Karyotypes that were rejected, or needed correction in strict mode.
    pub failed: usize,
}

impl RunStatus {
    /// Returns `true` if every karyotype was accepted.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Run the ISCN CLI application, writing reports to standard output.
///
/// # Errors
///
/// Returns `IscnError` for file I/O and configuration loading errors.
/// Karyotypes that fail to parse are reported in the output and counted in
/// [`RunStatus::failed`].
pub fn run(args: &Args) -> Result<RunStatus, IscnError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_with_output(args, &mut out)
}

/// Run the ISCN CLI application, writing reports to `out`.
///
/// # Errors
///
/// See [`run`].
pub fn run_with_output(args: &Args, out: &mut impl Write) -> Result<RunStatus, IscnError> {
    info!(
        input_path:? = args.input,
        karyotypes = args.karyotypes.len();
        "Processing karyotypes"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(format) = args.format {
        app_config = app_config.with_report_format(format);
    }
    let format = app_config.report().format();
    debug!(format:% = format; "Selected report format");

    let sources = read_sources(args)?;
    let parser = KaryotypeParser::new(app_config);
    let mut status = RunStatus::default();

    for source in sources.iter().map(String::as_str) {
        status.processed += 1;
        match parser.parse(source) {
            Ok(analysis) => report::write_analysis(out, format, source, &analysis)?,
            Err(IscnError::Parse { err, src }) => {
                warn!(karyotype = src.as_str(); "Karyotype not accepted");
                status.failed += 1;
                report::write_failure(out, format, &src, err.diagnostics())?;
            }
            Err(err) => return Err(err),
        }
    }
    out.flush()?;

    info!(processed = status.processed, failed = status.failed; "Karyotypes processed");
    Ok(status)
}

/// Collect karyotypes from `-e` values and the input file.
///
/// Blank lines and lines starting with `#` are skipped. Standard input is
/// read when neither an input file nor `-e` values are given.
fn read_sources(args: &Args) -> Result<Vec<String>, IscnError> {
    let mut sources = args.karyotypes.clone();

    let text = match args.input.as_deref() {
        Some("-") => Some(io::read_to_string(io::stdin())?),
        Some(path) => Some(fs::read_to_string(path)?),
        None if sources.is_empty() => Some(io::read_to_string(io::stdin())?),
        None => None,
    };
    if let Some(text) = text {
        sources.extend(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(str::to_string),
        );
    }
    debug!(count = sources.len(); "Read karyotypes");
    Ok(sources)
}
