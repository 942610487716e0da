use anyhow::Result;
use colored::Colorize;

use super::super::{args::WrapCommand, exit_status::ExitStatus, report::SUCCESS_MARK};
use crate::{
    config::Config,
    core::{
        ScanContext, ScanOverrides,
        codemod::{
            CallTarget, ImportChange, PatchOutcome, TranslationTarget, apply_patch,
            install_command, is_package_installed,
        },
    },
};

pub fn wrap(cmd: WrapCommand) -> Result<ExitStatus> {
    let ctx = ScanContext::new(&ScanOverrides {
        source_root: cmd.common.source_root.clone(),
        verbose: cmd.common.verbose,
        ..Default::default()
    })?;

    let target = build_target(&cmd, &ctx.config);

    let outcome = match apply_patch(&target, Some(&ctx.root_dir)) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!(
                "{} {}  {}",
                "error:".bold().red(),
                err,
                err.kind().as_str().dimmed().cyan()
            );
            return Ok(ExitStatus::Error);
        }
    };

    print_outcome(&target, &outcome);

    if let Some(source) = target.import_source.as_deref()
        && !target.skip_import
        && !is_package_installed(&ctx.root_dir, source)
    {
        eprintln!(
            "{} package `{}` is not installed under {}",
            "warning:".bold().yellow(),
            source,
            ctx.root_dir.join("node_modules").display()
        );
        eprintln!(
            "  {} run `{}`",
            "help:".bold(),
            install_command(&ctx.root_dir, source)
        );
    }

    Ok(ExitStatus::Success)
}

/// Command-line values win, the config fills the rest.
fn build_target(cmd: &WrapCommand, config: &Config) -> TranslationTarget {
    TranslationTarget {
        file_path: cmd.file.clone(),
        text: cmd.text.clone(),
        line: cmd.line,
        column: cmd.column,
        key: cmd.key.clone(),
        function_name: cmd
            .function_name
            .clone()
            .unwrap_or_else(|| config.function_name.clone()),
        import_source: cmd
            .import_source
            .clone()
            .or_else(|| config.import_source.clone()),
        import_kind: cmd.import_kind.unwrap_or(config.import_kind),
        skip_import: cmd.skip_import || config.skip_import,
    }
}

fn print_outcome(target: &TranslationTarget, outcome: &PatchOutcome) {
    let call = CallTarget::parse(&target.function_name)
        .map(|call| call.render(target.key.trim()))
        .unwrap_or_else(|_| target.key.clone());

    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Wrapped \"{}\" in {}:{}:{} with {}",
            target.text.trim(),
            target.file_path,
            target.line,
            target.column,
            call
        )
        .green()
    );

    let import_note = match outcome.import_change {
        ImportChange::Skipped | ImportChange::AlreadyPresent => None,
        ImportChange::SpecifierAdded => Some("added to existing import"),
        ImportChange::DeclarationAdded => Some("import declaration added"),
    };
    if let (Some(note), Some(source)) = (import_note, target.import_source.as_deref()) {
        println!("  {} {} ({})", "import:".bold(), source, note);
    }
}
