//! Source file parsing.
//!
//! - `source`: JS/TS/JSX source parser (uses swc for AST generation) and the
//!   position helpers built on its source map

pub mod source;

pub use source::{ParsedSource, SourceParseError, new_source_map, parse_source};
