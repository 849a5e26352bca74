//! Report model and rendering.
//!
//! Rendering is a pure function of the report and an explicitly passed
//! style; there is no global styling state. Classification mismatches are
//! the report's content, never a process failure.

use std::fmt::Write;

use colored::{ColoredString, Colorize};
use serde::Serialize;

use crate::error::Result;
use crate::reconcile::{CorpusScan, CrossReference};
use crate::scanner::ScanResult;

const RULE: &str = "--------------------------------------------------------------";

/// Complete outcome of an audit run, ordered by priority: errors first,
/// then warnings, then the skip sets worth a periodic look, then the keys
/// that are fine.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    /// Documented keys absent from code (documentation errors).
    pub missing: ScanResult,
    /// Code keys absent from documentation (documentation gaps).
    pub undocumented: ScanResult,
    /// Documentation keys dropped by structural filtering.
    pub docs_automatically_skipped: ScanResult,
    /// Code keys dropped by structural filtering.
    pub code_automatically_skipped: ScanResult,
    /// Documentation keys dropped by a manual rule.
    pub docs_manually_skipped: ScanResult,
    /// Code keys dropped by a manual rule.
    pub code_manually_skipped: ScanResult,
    /// Keys present in both corpora, with their documentation locations.
    pub documented: ScanResult,
}

impl AuditReport {
    /// Assemble the report from the two corpus scans and their
    /// cross-reference.
    pub fn new(docs: CorpusScan, code: CorpusScan, cross: CrossReference) -> Self {
        Self {
            missing: cross.missing,
            undocumented: cross.undocumented,
            docs_automatically_skipped: docs.automatically_skipped,
            code_automatically_skipped: code.automatically_skipped,
            docs_manually_skipped: docs.manually_skipped,
            code_manually_skipped: code.manually_skipped,
            documented: cross.documented,
        }
    }

    /// Serialize the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Style functions applied to report sections, passed explicitly so
/// rendering stays pure.
#[derive(Clone, Copy)]
pub struct ReportStyle {
    /// Banner style for documentation errors.
    pub error: fn(&str) -> ColoredString,
    /// Banner style for documentation gaps and automatic skips.
    pub warning: fn(&str) -> ColoredString,
    /// Banner style for manual skips.
    pub info: fn(&str) -> ColoredString,
    /// Banner style for fully documented keys.
    pub ok: fn(&str) -> ColoredString,
    /// Emphasis applied to each key.
    pub key: fn(&str) -> ColoredString,
}

impl ReportStyle {
    /// Terminal colors.
    pub fn colored() -> Self {
        Self {
            error: |s| s.bright_red().bold(),
            warning: |s| s.yellow().bold(),
            info: |s| s.blue().bold(),
            ok: |s| s.green().bold(),
            key: |s| s.bold(),
        }
    }

    /// No styling at all; output is plain text.
    pub fn plain() -> Self {
        Self {
            error: |s| s.normal(),
            warning: |s| s.normal(),
            info: |s| s.normal(),
            ok: |s| s.normal(),
            key: |s| s.normal(),
        }
    }
}

impl std::fmt::Debug for ReportStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportStyle").finish_non_exhaustive()
    }
}

/// Render the report as human-readable text.
pub fn render(report: &AuditReport, style: &ReportStyle) -> String {
    let mut out = String::new();
    section(
        &mut out,
        "Keys that are documented but not present in code",
        &report.missing,
        style.error,
        style.key,
    );
    section(
        &mut out,
        "Undocumented keys (present in code but not in documentation)",
        &report.undocumented,
        style.warning,
        style.key,
    );
    section(
        &mut out,
        "Automatically skipped keys referenced in documentation",
        &report.docs_automatically_skipped,
        style.warning,
        style.key,
    );
    section(
        &mut out,
        "Automatically skipped properties defined in code",
        &report.code_automatically_skipped,
        style.warning,
        style.key,
    );
    section(
        &mut out,
        "Manually skipped keys referenced in documentation",
        &report.docs_manually_skipped,
        style.info,
        style.key,
    );
    section(
        &mut out,
        "Manually skipped properties defined in code",
        &report.code_manually_skipped,
        style.info,
        style.key,
    );
    section(
        &mut out,
        "Documented keys (present in code and in documentation)",
        &report.documented,
        style.ok,
        style.key,
    );
    out
}

fn section(
    out: &mut String,
    title: &str,
    entries: &ScanResult,
    banner: fn(&str) -> ColoredString,
    key_style: fn(&str) -> ColoredString,
) {
    let _ = writeln!(out, "{}", banner(RULE));
    let _ = writeln!(out, "{}", banner(&format!(" {title}")));
    let _ = writeln!(out, "{}", banner(RULE));
    if entries.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for (key, locations) in entries {
        let _ = writeln!(out, "{}", key_style(key));
        for location in locations {
            let _ = writeln!(
                out,
                "  {}:{}: {}",
                location.file.display(),
                location.line_number,
                location.line.trim_end()
            );
        }
    }
    let _ = writeln!(out);
}
