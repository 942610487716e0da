use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::{codemod::ImportKind, utils::expand_braces};

pub const CONFIG_FILE_NAME: &str = ".localeforgerc.json";

/// Directory names skipped by default when walking a project.
pub const DEFAULT_IGNORED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    ".cache",
    "dist",
    "build",
    ".next",
    "coverage",
];

/// Call names recognized as translation calls out of the box.
pub const DEFAULT_TRANSLATION_FUNCTIONS: &[&str] =
    &["t", "translate", "formatMessage", "intl.formatMessage"];

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default = "default_translation_functions")]
    pub translation_functions: Vec<String>,
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default = "default_function_name")]
    pub function_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_source: Option<String>,
    #[serde(default)]
    pub import_kind: ImportKind,
    #[serde(default)]
    pub skip_import: bool,
}

fn default_extensions() -> Vec<String> {
    [".tsx", ".jsx", ".ts", ".js"].map(String::from).to_vec()
}

fn default_ignores() -> Vec<String> {
    DEFAULT_IGNORED_DIRS.iter().map(|s| s.to_string()).collect()
}

fn default_translation_functions() -> Vec<String> {
    DEFAULT_TRANSLATION_FUNCTIONS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_namespace() -> String {
    "ui".to_string()
}

fn default_function_name() -> String {
    "t".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            ignores: default_ignores(),
            includes: Vec::new(),
            translation_functions: default_translation_functions(),
            namespace: default_namespace(),
            function_name: default_function_name(),
            import_source: None,
            import_kind: ImportKind::default(),
            skip_import: false,
        }
    }
}

/// Check if a pattern contains glob wildcards (*, ? or a brace list).
pub fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?') || pattern.contains('{')
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` or `includes` is invalid,
    /// if an extension entry is empty, or if no translation function is configured.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            validate_glob(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Patterns without wildcards are literal directory paths, so brackets
        // in plain directory names stay valid without escaping.
        for pattern in &self.includes {
            if is_glob_pattern(pattern) {
                validate_glob(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if self
            .extensions
            .iter()
            .any(|ext| ext.trim().trim_start_matches('.').is_empty())
        {
            bail!("Empty entry in 'extensions'");
        }

        if self
            .translation_functions
            .iter()
            .all(|name| name.trim().is_empty())
        {
            bail!("'translationFunctions' must name at least one function");
        }

        Ok(())
    }

    /// Extensions with a leading dot, as matched against file names.
    pub fn normalized_extensions(&self) -> Vec<String> {
        normalize_extensions(&self.extensions)
    }
}

fn validate_glob(pattern: &str) -> Result<()> {
    for expanded in expand_braces(pattern) {
        Pattern::new(&expanded)?;
    }
    Ok(())
}

/// Normalize extension entries so `tsx`, `.tsx` and ` .tsx ` all become `.tsx`.
pub fn normalize_extensions(extensions: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = extensions
        .iter()
        .map(|ext| ext.trim())
        .filter(|ext| !ext.is_empty())
        .map(|ext| {
            if ext.starts_with('.') {
                ext.to_string()
            } else {
                format!(".{}", ext)
            }
        })
        .collect();
    normalized.dedup();
    normalized
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
