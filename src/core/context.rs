use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;

use crate::{
    config::{Config, load_config, normalize_extensions},
    core::scan::{ScanOptions, ScanReport, TranslationFunctions, scan_project},
};

/// Values given on the command line (or by an MCP client) that take priority
/// over the config file.
#[derive(Debug, Clone, Default)]
pub struct ScanOverrides {
    /// Project root; also where the config file search starts. Defaults to `.`.
    pub source_root: Option<PathBuf>,
    /// Replace the configured include directories.
    pub includes: Vec<String>,
    /// Replace the configured extensions.
    pub extensions: Vec<String>,
    /// Added to the configured ignore patterns.
    pub ignores: Vec<String>,
    pub verbose: bool,
}

/// Configuration resolved for one run.
///
/// Priority, highest first:
/// 1. CLI arguments / tool parameters
/// 2. `.localeforgerc.json`
/// 3. Built-in defaults
pub struct ScanContext {
    pub config: Config,
    /// Project root directory (scan root, base for relative patch paths).
    pub root_dir: PathBuf,
    /// Whether the config came from a file rather than defaults.
    pub config_from_file: bool,
    pub verbose: bool,
}

impl ScanContext {
    pub fn new(overrides: &ScanOverrides) -> Result<Self> {
        let verbose = overrides.verbose;
        let root_dir = overrides
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        if !root_dir.is_dir() {
            anyhow::bail!("Source root is not a directory: {}", root_dir.display());
        }

        let config_result = load_config(&root_dir)?;
        if verbose && !config_result.from_file {
            eprintln!(
                "{} No {} found, using default configuration",
                "note:".bold(),
                crate::config::CONFIG_FILE_NAME
            );
        }

        let mut config = config_result.config;
        if !overrides.includes.is_empty() {
            config.includes = overrides.includes.clone();
        }
        if !overrides.extensions.is_empty() {
            config.extensions = overrides.extensions.clone();
        }
        config.ignores.extend(overrides.ignores.iter().cloned());
        config.validate()?;

        Ok(Self {
            config,
            root_dir,
            config_from_file: config_result.from_file,
            verbose,
        })
    }

    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            extensions: normalize_extensions(&self.config.extensions),
            includes: self.config.includes.clone(),
            ignores: self.config.ignores.clone(),
            translation_functions: TranslationFunctions::new(&self.config.translation_functions),
            verbose: self.verbose,
        }
    }

    /// Run the scanner over the project.
    pub fn scan(&self) -> ScanReport {
        let report = scan_project(&self.root_dir, &self.scan_options());

        if report.skipped_count > 0 {
            eprintln!(
                "{} {} path(s) skipped due to access errors{}",
                "warning:".bold().yellow(),
                report.skipped_count,
                if self.verbose {
                    ""
                } else {
                    " (use -v for details)"
                }
            );
        }

        report
    }
}
