//! Candidate scanner.
//!
//! Walks a source tree, parses every matching file and extracts two disjoint
//! sets of [`SourceCandidate`]s: bare JSX text still waiting for translation,
//! and call sites already wrapped in a recognized translation function.
//!
//! Files are parsed in parallel with rayon; each file owns its source map and
//! tree, so nothing is shared between workers. Output order follows the sorted
//! file walk, then source order inside each file.

pub mod callee;
pub mod candidate;
pub mod visitor;

use std::{fs, path::Path};

use colored::Colorize;
use rayon::prelude::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use callee::TranslationFunctions;
pub use candidate::{ReviewCandidate, SourceCandidate, candidate_id};
pub use visitor::CandidateCollector;

use crate::core::{
    file_scanner::scan_files,
    parsers::{SourceParseError, new_source_map, parse_source},
    utils::to_forward_slashes,
};

/// What to scan and how to recognize translation calls.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// File name suffixes with leading dot.
    pub extensions: Vec<String>,
    pub includes: Vec<String>,
    pub ignores: Vec<String>,
    pub translation_functions: TranslationFunctions,
    pub verbose: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        let config = crate::config::Config::default();
        Self {
            extensions: config.normalized_extensions(),
            includes: config.includes,
            ignores: config.ignores,
            translation_functions: TranslationFunctions::default(),
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FileFailureKind {
    Read,
    Parse,
}

/// A file the scan could not process. The scan continues past it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileFailure {
    /// Path relative to the scan root.
    pub file: String,
    pub kind: FileFailureKind,
    pub error: String,
}

/// Result of scanning a project.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub candidates: Vec<SourceCandidate>,
    pub failures: Vec<FileFailure>,
    pub files_scanned: usize,
    /// Paths the file walk could not access.
    pub skipped_count: usize,
}

impl ScanReport {
    pub fn plain(&self) -> impl Iterator<Item = &SourceCandidate> {
        self.candidates.iter().filter(|c| !c.localized)
    }

    pub fn localized(&self) -> impl Iterator<Item = &SourceCandidate> {
        self.candidates.iter().filter(|c| c.localized)
    }
}

/// Extract candidates from one source text.
///
/// `file_path` is the path recorded in candidates (relative to the scan root);
/// its extension also selects the grammar.
pub fn scan_source(
    code: String,
    file_path: &str,
    functions: &TranslationFunctions,
) -> Result<Vec<SourceCandidate>, SourceParseError> {
    let parsed = parse_source(code, file_path, new_source_map())?;
    let collector = CandidateCollector::new(&parsed, file_path, functions);
    Ok(collector.collect(&parsed.module))
}

/// Scan every matching file under `root_dir`.
///
/// Read and parse failures are recorded in [`ScanReport::failures`] and never
/// abort the scan.
pub fn scan_project(root_dir: &Path, options: &ScanOptions) -> ScanReport {
    let scan_result = scan_files(
        root_dir,
        &options.extensions,
        &options.includes,
        &options.ignores,
        options.verbose,
    );

    let results: Vec<_> = scan_result
        .files
        .par_iter()
        .map(|path| -> Result<Vec<SourceCandidate>, FileFailure> {
            let relative = path.strip_prefix(root_dir).unwrap_or(path);
            let relative = to_forward_slashes(&relative.to_string_lossy());

            let code = fs::read_to_string(path).map_err(|e| FileFailure {
                file: relative.clone(),
                kind: FileFailureKind::Read,
                error: e.to_string(),
            })?;

            scan_source(code, &relative, &options.translation_functions).map_err(|e| {
                FileFailure {
                    file: relative.clone(),
                    kind: FileFailureKind::Parse,
                    error: e.to_string(),
                }
            })
        })
        .collect();

    let mut report = ScanReport {
        files_scanned: scan_result.files.len(),
        skipped_count: scan_result.skipped_count,
        ..Default::default()
    };

    for result in results {
        match result {
            Ok(candidates) => report.candidates.extend(candidates),
            Err(failure) => {
                if options.verbose {
                    eprintln!(
                        "{} Failed to {} {}: {}",
                        "warning:".bold().yellow(),
                        match failure.kind {
                            FileFailureKind::Read => "read",
                            FileFailureKind::Parse => "parse",
                        },
                        failure.file,
                        failure.error
                    );
                }
                report.failures.push(failure);
            }
        }
    }

    report
}
