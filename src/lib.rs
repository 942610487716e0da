//! locale-forge - localizable text scanner and translation codemod
//!
//! locale-forge is a CLI tool and library that finds human-readable text in
//! JavaScript/TypeScript/JSX sources, proposes stable localization keys for it,
//! and rewrites a single occurrence into a translation call such as
//! `t("home.title")` without disturbing the rest of the file.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (scan, wrap, suggest, init, serve)
//! - `config`: Configuration file loading and parsing
//! - `core`: Scanner, key suggestion engine and codemod patcher
//! - `issues`: Reportable findings produced by a scan
//! - `mcp`: Model Context Protocol server implementation

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod mcp;
