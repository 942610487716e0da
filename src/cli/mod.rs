//! Command-line layer: argument parsing, command dispatch and terminal output.

use anyhow::Result;

pub mod args;
pub mod commands;
mod exit_status;
pub mod report;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

use commands::{init::init, scan::scan, suggest::suggest, wrap::wrap};

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(Arguments { command }) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    match command {
        Some(Command::Scan(cmd)) => scan(cmd),
        Some(Command::Wrap(cmd)) => wrap(cmd),
        Some(Command::Suggest(cmd)) => suggest(cmd),
        Some(Command::Init(cmd)) => init(cmd),
        // Handled in main before dispatch.
        Some(Command::Serve) => anyhow::bail!("serve must be started from main"),
        None => Ok(ExitStatus::Success),
    }
}
