//! Utility functions and helpers for the core engine.
//!
//! ## Module Structure
//!
//! - `glob_matcher`: Brace expansion and compiled glob sets for path filtering
//! - `text`: Small text helpers shared by the scanner and the patcher

pub mod glob_matcher;
pub mod text;

pub use glob_matcher::*;
pub use text::*;
