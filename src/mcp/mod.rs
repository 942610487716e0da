//! Model Context Protocol (MCP) server.
//!
//! Exposes scanning, key suggestion and patching to review clients and AI
//! assistants over stdio.
//!
//! ## Module Structure
//!
//! - `server`: Tool implementations and the stdio entry point
//! - `types`: Tool parameter and result types

mod server;
pub mod types;

pub use server::{LocaleForgeMcpServer, run_server};
