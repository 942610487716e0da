use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};

use super::super::{
    args::{OutputFormat, ScanCommand},
    exit_status::ExitStatus,
    report::{self, print_failure_warning, print_localized_note_to},
};
use crate::{
    core::{
        FileFailure, ReviewCandidate, ScanContext, ScanOverrides, ScanReport, bundle::nest_key,
    },
    issues::{FileFailureIssue, Issue, UntranslatedTextIssue},
};

/// JSON document printed by `scan --format json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScanOutput<'a> {
    files_scanned: usize,
    plain_count: usize,
    localized_count: usize,
    candidates: Vec<ReviewCandidate>,
    failures: &'a [FileFailure],
}

pub fn scan(cmd: ScanCommand) -> Result<ExitStatus> {
    let ctx = ScanContext::new(&ScanOverrides {
        source_root: cmd.common.source_root.clone(),
        includes: cmd.includes.clone(),
        extensions: cmd.extensions.clone(),
        ignores: cmd.ignores.clone(),
        verbose: cmd.common.verbose,
    })?;

    let report = ctx.scan();
    let namespace = &ctx.config.namespace;

    match cmd.format {
        OutputFormat::Pretty => print_pretty(&report, namespace, cmd.plain_only),
        OutputFormat::Json => {
            print_json(&report, namespace, cmd.plain_only, &mut io::stdout().lock())?;
            print_failure_warning(report.failures.len(), ctx.verbose);
        }
        OutputFormat::Bundle => {
            print_bundle(&report, namespace, &mut io::stdout().lock())?;
            print_failure_warning(report.failures.len(), ctx.verbose);
        }
    }

    Ok(exit_status(&report))
}

/// Unscannable files win over findings, findings over a clean run.
fn exit_status(report: &ScanReport) -> ExitStatus {
    if !report.failures.is_empty() {
        ExitStatus::Error
    } else if report.plain().next().is_some() {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    }
}

fn print_pretty(report: &ScanReport, namespace: &str, plain_only: bool) {
    let mut issues: Vec<Issue> = report
        .plain()
        .map(|c| Issue::UntranslatedText(UntranslatedTextIssue::new(c, namespace)))
        .collect();
    issues.extend(
        report
            .failures
            .iter()
            .map(|f| Issue::FileFailure(FileFailureIssue::from(f))),
    );

    let localized_count = report.localized().count();

    if issues.is_empty() {
        report::print_success(
            report.files_scanned,
            (!plain_only).then_some(localized_count),
        );
        return;
    }

    report::report(&issues);
    if !plain_only && localized_count > 0 {
        print_localized_note_to(localized_count, &mut io::stdout().lock());
    }
}

fn print_json<W: Write>(
    report: &ScanReport,
    namespace: &str,
    plain_only: bool,
    writer: &mut W,
) -> Result<()> {
    let candidates: Vec<ReviewCandidate> = report
        .candidates
        .iter()
        .filter(|c| !(plain_only && c.localized))
        .map(|c| ReviewCandidate::new(c.clone(), namespace))
        .collect();

    let output = ScanOutput {
        files_scanned: report.files_scanned,
        plain_count: report.plain().count(),
        localized_count: report.localized().count(),
        candidates,
        failures: &report.failures,
    };

    let json = serde_json::to_string_pretty(&output).context("Failed to serialize scan output")?;
    writeln!(writer, "{}", json)?;
    Ok(())
}

/// Nested bundle of suggested key → text for every plain candidate.
fn build_bundle(report: &ScanReport, namespace: &str) -> Map<String, Value> {
    let mut bundle = Map::new();
    for candidate in report.plain() {
        nest_key(
            &candidate.suggested_key(namespace),
            &candidate.text,
            &mut bundle,
        );
    }
    bundle
}

fn print_bundle<W: Write>(report: &ScanReport, namespace: &str, writer: &mut W) -> Result<()> {
    let bundle = Value::Object(build_bundle(report, namespace));
    let json = serde_json::to_string_pretty(&bundle).context("Failed to serialize bundle")?;
    writeln!(writer, "{}", json)?;
    Ok(())
}
