//! Text output for each karyotype in the selected [`ReportFormat`].

use std::io::{self, Write};

use iscn::{
    Analysis, Diagnostic,
    config::ReportFormat,
    semantic::{AberrationSummary, Change, CloneRole, CloneSummary, Karyotype},
};

use crate::error_adapter::render_diagnostics;

/// Write the report for a karyotype that parsed.
pub fn write_analysis(
    out: &mut impl Write,
    format: ReportFormat,
    source: &str,
    analysis: &Analysis,
) -> io::Result<()> {
    writeln!(out, "{}", analysis.normalized())?;
    match format {
        ReportFormat::Summary => write_summary(out, &analysis.karyotype)?,
        _ => write_diagnostics(out, format, source, &analysis.diagnostics)?,
    }
    Ok(())
}

/// Write the report for a karyotype that was not accepted.
pub fn write_failure(
    out: &mut impl Write,
    format: ReportFormat,
    source: &str,
    diagnostics: &[Diagnostic],
) -> io::Result<()> {
    writeln!(out, "{source}")?;
    let format = match format {
        ReportFormat::Summary => ReportFormat::Annotations,
        other => other,
    };
    write_diagnostics(out, format, source, diagnostics)
}

fn write_diagnostics(
    out: &mut impl Write,
    format: ReportFormat,
    source: &str,
    diagnostics: &[Diagnostic],
) -> io::Result<()> {
    if format == ReportFormat::Pretty {
        let rendered = render_diagnostics(diagnostics, source).map_err(io::Error::other)?;
        return out.write_all(rendered.as_bytes());
    }
    for diagnostic in diagnostics {
        writeln!(out, "{}", diagnostic.annotation())?;
    }
    Ok(())
}

fn write_summary(out: &mut impl Write, karyotype: &Karyotype) -> io::Result<()> {
    if let Some(mosaicism) = karyotype.mosaicism {
        writeln!(out, "  {mosaicism}")?;
    }
    for clone in &karyotype.clones {
        writeln!(out, "  {}", clone_line(clone))?;
        for aberration in &clone.aberrations {
            writeln!(out, "    {}", aberration_line(aberration))?;
        }
    }
    Ok(())
}

fn role_name(role: CloneRole) -> &'static str {
    match role {
        CloneRole::First => "first",
        CloneRole::Independent => "independent",
        CloneRole::Idem => "idem",
        CloneRole::Stemline => "stemline",
        CloneRole::Sideline => "sideline",
    }
}

fn join<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn clone_line(clone: &CloneSummary) -> String {
    let mut parts = Vec::new();
    match clone.chromosome_count {
        Some(range) if range.is_exact() => parts.push(format!("count={}", range.min)),
        Some(range) => parts.push(format!("count={}~{}", range.min, range.max)),
        None => {}
    }
    if let Some(gender) = &clone.gender {
        parts.push(format!("sex={gender}"));
    }
    if let Some(ploidy) = clone.ploidy {
        parts.push(format!("ploidy={}", ploidy.name()));
    }
    if !clone.gains.is_empty() {
        parts.push(format!("gains={}", join(&clone.gains)));
    }
    if !clone.losses.is_empty() {
        parts.push(format!("losses={}", join(&clone.losses)));
    }
    if clone.markers > 0 {
        parts.push(format!("markers={}", clone.markers));
    }
    if clone.double_minutes {
        parts.push("dmin".to_string());
    }
    if clone.incomplete {
        parts.push("incomplete".to_string());
    }
    if let Some(cells) = clone.cells {
        let label = if clone.composite { "cp" } else { "cells" };
        parts.push(format!("{label}={cells}"));
    }
    if clone.is_normal() {
        parts.push("normal".to_string());
    }
    format!(
        "clone #{} ({}): {}",
        clone.ordinal,
        role_name(clone.role),
        parts.join(" ")
    )
}

fn aberration_line(aberration: &AberrationSummary) -> String {
    let sign = match aberration.change {
        Some(Change::Gain) => "+",
        Some(Change::Loss) => "-",
        None => "",
    };
    let mut line = format!(
        "{sign}{} chromosomes={}",
        aberration.id,
        join(&aberration.chromosomes)
    );
    if !aberration.breakpoints.is_empty() {
        line.push_str(&format!(" breakpoints={}", aberration.breakpoints.join(",")));
    }
    for rearrangement in &aberration.rearrangements {
        line.push_str(&format!(" [{}]", aberration_line(rearrangement)));
    }
    if aberration.copies > 1 {
        line.push_str(&format!(" x{}", aberration.copies));
    }
    if aberration.uncertain {
        line.push_str(" uncertain");
    }
    line
}
