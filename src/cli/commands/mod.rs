//! CLI command implementations

mod drift;
mod validate;
mod windows;

#[cfg(test)]
mod tests;

use crate::cli::LogLevel;
use crate::config::{apply_source_overrides, load_spec, Cli, Command, DriftSpec, SourceArgs};
use crate::error::Result;

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> std::result::Result<(), String> {
    // Configure output based on verbose/quiet flags
    let log_level = LogLevel::from_flags(cli.quiet, cli.verbose);

    let result = match cli.command {
        Command::Drift(args) => drift::run_drift(args, log_level),
        Command::Windows(args) => windows::run_windows(args, log_level),
        Command::Validate(args) => validate::run_validate(args, log_level),
    };
    result.map_err(|e| format!("[{}] {e}", e.code()))
}

/// Run spec from `--config` (or defaults) with the source flags applied.
fn source_spec(args: &SourceArgs) -> Result<DriftSpec> {
    let mut spec = match &args.config {
        Some(path) => load_spec(path)?,
        None => DriftSpec::default(),
    };
    apply_source_overrides(&mut spec, args);
    Ok(spec)
}
