//! Windows command implementation

use super::source_spec;
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{validate_source, DriftSpec, ValidationError, WindowsArgs};
use crate::data::{groups, load_csv, Dataset};
use crate::error::Result;
use crate::window::{resolve_windows, validate_window, ResolvedWindows, WindowCheck};

pub fn run_windows(args: WindowsArgs, level: LogLevel) -> Result<()> {
    let spec = source_spec(&args.source)?;
    validate_source(&spec)?;

    let dataset = load_dataset(&spec, level)?;
    let dates = dataset.parse_dates(&spec.datetime_col)?;
    let resolved = resolve_windows(&dates, &spec.bounds()?)?;
    log_bounds(level, &resolved);
    log(level, LogLevel::Normal, &format!("datetime range: {}", resolved.span));

    for group in groups(&dataset, &spec.group_col)? {
        let baseline = validate_window(&resolved.baseline, &dataset, &dates, &group)?;
        let target = validate_window(&resolved.target, &dataset, &dates, &group)?;

        let span = baseline.span().map_or_else(|| "no dates".to_string(), ToString::to_string);
        log(level, LogLevel::Normal, &format!("{group} ({span})"));
        log(level, LogLevel::Normal, &format!("  baseline: {}", describe(&baseline)));
        log(level, LogLevel::Normal, &format!("  target: {}", describe(&target)));
    }

    Ok(())
}

fn describe(check: &WindowCheck) -> String {
    match check.reason() {
        None => format!("{} valid", check.window()),
        Some(reason) => format!("{} invalid, {reason}", check.window()),
    }
}

/// Load the CSV named by the spec.
pub(super) fn load_dataset(spec: &DriftSpec, level: LogLevel) -> Result<Dataset> {
    let path = spec.data.as_ref().ok_or(ValidationError::MissingDataPath)?;
    log(level, LogLevel::Verbose, &format!("Loading {}", path.display()));
    let dataset = load_csv(path)?;
    log(
        level,
        LogLevel::Verbose,
        &format!("  {} rows, {} columns", dataset.len(), dataset.columns().len()),
    );
    Ok(dataset)
}

/// Report each boundary, noting whether it was given or derived.
pub(super) fn log_bounds(level: LogLevel, windows: &ResolvedWindows) {
    for bound in &windows.bounds {
        let verb = if bound.defaulted { "being set to" } else { "read in as" };
        log(level, LogLevel::Normal, &format!("{} {verb} {}", bound.name, bound.date));
    }
}
