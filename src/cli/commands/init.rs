use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::{args::InitCommand, exit_status::ExitStatus, report::SUCCESS_MARK};
use crate::config::{CONFIG_FILE_NAME, default_config_json};

pub fn init(cmd: InitCommand) -> Result<ExitStatus> {
    let root = cmd.source_root.unwrap_or_else(|| PathBuf::from("."));
    let config_path = root.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        eprintln!(
            "{} {} already exists",
            "error:".bold().red(),
            config_path.display()
        );
        return Ok(ExitStatus::Failure);
    }

    fs::write(&config_path, default_config_json()?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", CONFIG_FILE_NAME).green()
    );

    Ok(ExitStatus::Success)
}
