//! Command-line argument definitions for the ISCN CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the karyotypes to read, the
//! configuration file, the report format and logging verbosity.

use clap::Parser;

use iscn::config::ReportFormat;

/// Command-line arguments for the ISCN karyotype annotator
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// File with one karyotype per line; `-` reads standard input
    #[arg(help = "Path to the input file")]
    pub input: Option<String>,

    /// Karyotype given on the command line; may be repeated
    #[arg(short = 'e', long = "karyotype", value_name = "KARYOTYPE")]
    pub karyotypes: Vec<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Report format (annotations, pretty, summary); overrides the configuration
    #[arg(short, long)]
    pub format: Option<ReportFormat>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
