use anyhow::Result;

use super::super::{args::SuggestCommand, exit_status::ExitStatus};
use crate::core::{
    ScanContext, ScanOverrides,
    keygen::{namespace_from_file, suggest_key},
};

pub fn suggest(cmd: SuggestCommand) -> Result<ExitStatus> {
    let ctx = ScanContext::new(&ScanOverrides {
        source_root: cmd.common.source_root.clone(),
        verbose: cmd.common.verbose,
        ..Default::default()
    })?;

    let namespace = resolve_namespace(&cmd, &ctx.config.namespace);
    println!("{}", suggest_key(&cmd.text, &namespace));

    Ok(ExitStatus::Success)
}

fn resolve_namespace(cmd: &SuggestCommand, fallback: &str) -> String {
    match (&cmd.namespace, &cmd.file) {
        (Some(namespace), _) if !namespace.trim().is_empty() => namespace.trim().to_string(),
        (_, Some(file)) => namespace_from_file(file, fallback),
        _ => fallback.to_string(),
    }
}
