use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::glob;
use walkdir::{DirEntry, WalkDir};

use crate::config::is_glob_pattern;
use crate::core::utils::{GlobSet, expand_braces, to_forward_slashes};

/// Result of scanning files.
pub struct ScanResult {
    /// Matching files, sorted by path.
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

/// Ignore rules compiled from user patterns.
///
/// - glob patterns (`**/dist/**`, `**/*.{test,spec}.tsx`) match the `/`-separated
///   path relative to the scan root
/// - a bare name without `/` (`node_modules`) matches any path component
/// - a literal relative path (`src/generated`) matches that path and everything below it
#[derive(Default)]
struct IgnoreRules {
    globs: GlobSet,
    names: Vec<String>,
    prefixes: Vec<PathBuf>,
}

impl IgnoreRules {
    fn new(patterns: &[String], verbose: bool) -> Self {
        let mut rules = Self::default();
        for p in patterns {
            let p = p.trim();
            if p.is_empty() {
                continue;
            }
            if is_glob_pattern(p) {
                match GlobSet::new(&[p]) {
                    Ok(set) => rules.globs.extend(set),
                    Err(e) => {
                        if verbose {
                            eprintln!(
                                "{} Invalid ignore pattern '{}': {}",
                                "warning:".bold().yellow(),
                                p,
                                e
                            );
                        }
                    }
                }
            } else {
                let literal = to_forward_slashes(p);
                let literal = literal.trim_start_matches("./").trim_end_matches('/');
                if literal.contains('/') {
                    rules.prefixes.push(PathBuf::from(literal));
                } else {
                    rules.names.push(literal.to_string());
                }
            }
        }
        rules
    }

    fn is_ignored(&self, relative: &Path) -> bool {
        if relative.as_os_str().is_empty() {
            return false;
        }
        if self
            .names
            .iter()
            .any(|name| relative.iter().any(|c| c.to_str() == Some(name.as_str())))
        {
            return true;
        }
        if self.prefixes.iter().any(|prefix| relative.starts_with(prefix)) {
            return true;
        }
        let relative_str = to_forward_slashes(&relative.to_string_lossy());
        self.globs.is_match(&relative_str)
    }
}

/// Resolve the set of source files under `base_dir`.
///
/// - `extensions`: file name suffixes to keep (with leading dot, e.g. `.tsx`)
/// - `includes`: directories to restrict the walk to; empty means the whole root.
///   Entries containing wildcards or brace lists are expanded as globs.
/// - `ignore_patterns`: see [`IgnoreRules`]
///
/// Dot-prefixed files and directories below the walked directories are skipped.
pub fn scan_files(
    base_dir: &Path,
    extensions: &[String],
    includes: &[String],
    ignore_patterns: &[String],
    verbose: bool,
) -> ScanResult {
    let mut files: BTreeSet<PathBuf> = BTreeSet::new();
    let mut skipped_count = 0;

    let ignore_rules = IgnoreRules::new(ignore_patterns, verbose);

    for dir in resolve_include_dirs(base_dir, includes, verbose) {
        let walker = WalkDir::new(&dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || (!is_hidden(entry)
                        && !ignore_rules.is_ignored(relative_to(base_dir, entry.path())))
            });

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    if verbose {
                        eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                    }
                    continue;
                }
            };
            let path = entry.path();

            if path.is_file() && has_extension(path, extensions) {
                files.insert(path.to_path_buf());
            }
        }
    }

    ScanResult {
        files: files.into_iter().collect(),
        skipped_count,
    }
}

fn resolve_include_dirs(base_dir: &Path, includes: &[String], verbose: bool) -> Vec<PathBuf> {
    let includes: Vec<String> = includes
        .iter()
        .map(|inc| to_forward_slashes(inc.trim()))
        .map(|inc| inc.trim_end_matches('/').to_string())
        .collect();

    if includes.is_empty() || includes.iter().any(|inc| inc.is_empty() || inc == ".") {
        return vec![base_dir.to_path_buf()];
    }

    let mut paths = Vec::new();
    for inc in &includes {
        if is_glob_pattern(inc) {
            for expanded in expand_braces(inc) {
                let full_pattern = base_dir.join(&expanded);
                let pattern_str = full_pattern.to_string_lossy();
                match glob(&pattern_str) {
                    Ok(entries) => {
                        for entry in entries.flatten() {
                            if entry.is_dir() {
                                paths.push(entry);
                            }
                        }
                    }
                    Err(e) => {
                        if verbose {
                            eprintln!(
                                "{} Invalid glob pattern '{}': {}",
                                "warning:".bold().yellow(),
                                inc,
                                e
                            );
                        }
                    }
                }
            }
        } else {
            let path = base_dir.join(inc.trim_start_matches("./"));
            if path.exists() {
                paths.push(path);
            } else if verbose {
                eprintln!(
                    "{} Include path does not exist: {}",
                    "warning:".bold().yellow(),
                    path.display()
                );
            }
        }
    }
    paths
}

fn relative_to<'a>(base_dir: &Path, path: &'a Path) -> &'a Path {
    path.strip_prefix(base_dir).unwrap_or(path)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.') && name != "." && name != "..")
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    extensions
        .iter()
        .any(|ext| name.len() > ext.len() && name.ends_with(ext.as_str()))
}
