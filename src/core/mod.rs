//! Core engine.
//!
//! ## Module Structure
//!
//! - `file_scanner`: Resolve the set of source files under a root
//! - `parsers`: Parse JS/TS/JSX sources with position tracking
//! - `scan`: Extract localizable candidates from parsed files
//! - `keygen`: Suggest localization keys for candidate text
//! - `codemod`: Wrap one located literal in a translation call
//! - `bundle`: Dotted-path helpers for nested locale bundles
//! - `context`: Config + CLI overrides resolved for one run
//! - `utils`: Glob and text helpers

pub mod bundle;
pub mod codemod;
pub mod context;
pub mod file_scanner;
pub mod keygen;
pub mod parsers;
pub mod scan;
pub mod utils;

pub use context::{ScanContext, ScanOverrides};
pub use scan::{
    FileFailure, FileFailureKind, ReviewCandidate, ScanOptions, ScanReport, SourceCandidate,
};
