//! Report formatting and printing.
//!
//! Cargo-style output for scan findings. Kept out of `core` so the engine can
//! be used as a library without terminal concerns.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stdout.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer, sorted by file, line and column.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort_by(compare_issues);

    let max_line_width = calculate_max_line_width(&sorted);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

/// Print a success message when nothing is left to translate.
pub fn print_success(files_scanned: usize, localized_count: Option<usize>) {
    print_success_to(files_scanned, localized_count, &mut io::stdout().lock());
}

pub fn print_success_to<W: Write>(
    files_scanned: usize,
    localized_count: Option<usize>,
    writer: &mut W,
) {
    let files = format!(
        "Scanned {} source {}",
        files_scanned,
        if files_scanned == 1 { "file" } else { "files" }
    );
    let msg = match localized_count {
        Some(count) => format!(
            "{} - no untranslated text found ({} translation {})",
            files,
            count,
            if count == 1 { "call" } else { "calls" }
        ),
        None => format!("{} - no untranslated text found", files),
    };
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());
}

/// Print how many translation calls the scan saw next to the findings.
pub fn print_localized_note_to<W: Write>(localized_count: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {} already wrapped in a translation call",
        "note:".bold(),
        localized_count
    );
}

/// Print a warning about files that could not be read or parsed.
pub fn print_failure_warning(count: usize, verbose: bool) {
    print_failure_warning_to(count, verbose, &mut io::stderr().lock());
}

pub fn print_failure_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be scanned (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    match issue.location() {
        ReportLocation::Source(ctx) => {
            let _ = writeln!(
                writer,
                "  {} {}:{}:{}",
                "-->".blue(),
                ctx.file_path,
                ctx.line,
                ctx.col
            );

            let caret_char = match severity {
                Severity::Error => "^".red(),
                Severity::Warning => "^".yellow(),
            };

            let _ = writeln!(
                writer,
                "{:>width$} {}",
                "",
                "|".blue(),
                width = max_line_width
            );
            let _ = writeln!(
                writer,
                "{:>width$} {} {}",
                ctx.line.to_string().blue(),
                "|".blue(),
                ctx.source_line,
                width = max_line_width
            );

            let prefix: String = ctx.source_line.chars().take(ctx.caret_offset).collect();
            let caret_padding = UnicodeWidthStr::width(prefix.as_str());
            let _ = writeln!(
                writer,
                "{:>width$} {} {:>padding$}{}",
                "",
                "|".blue(),
                "",
                caret_char,
                width = max_line_width,
                padding = caret_padding
            );
        }
        ReportLocation::File { path } => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), path);
        }
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer);
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} problems ({} {}, {} {})",
        FAILURE_MARK.red(),
        issues.len(),
        total_errors,
        if total_errors == 1 { "error" } else { "errors" }.red(),
        total_warnings,
        if total_warnings == 1 {
            "warning"
        } else {
            "warnings"
        }
        .yellow()
    );
}

fn location_key<'a>(loc: &ReportLocation<'a>) -> (&'a str, usize, usize) {
    match loc {
        ReportLocation::Source(ctx) => (&ctx.file_path, ctx.line, ctx.col),
        ReportLocation::File { path } => (path, 0, 0),
    }
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Source(ctx) => Some(ctx.line),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

fn compare_issues(a: &Issue, b: &Issue) -> std::cmp::Ordering {
    location_key(&a.location()).cmp(&location_key(&b.location()))
}
