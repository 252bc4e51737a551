//! Drift command implementation

use std::path::PathBuf;

use super::source_spec;
use super::windows::{load_dataset, log_bounds};
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{apply_overrides, validate_spec, DriftArgs, DriftSpec};
use crate::error::{DriftError, Result};
use crate::report::{default_output_path, detect_drift, save_report, DriftRequest, GroupOutcome, SkipReason};
use crate::window::{resolve_windows, ResolvedWindows};

pub fn run_drift(args: DriftArgs, level: LogLevel) -> Result<()> {
    let mut spec = source_spec(&args.source)?;
    apply_overrides(&mut spec, &args);
    validate_spec(&spec)?;
    let output = output_path(&spec)?;

    let dataset = load_dataset(&spec, level)?;
    let resolved = resolve_windows(&dataset.parse_dates(&spec.datetime_col)?, &spec.bounds()?)?;
    log_bounds(level, &resolved);

    let request = DriftRequest::new(spec.features.clone(), &spec.datetime_col, resolved.baseline, resolved.target)
        .with_group_col(&spec.group_col)
        .with_p_value(spec.p_value);
    let run = detect_drift(&dataset, &request)?;

    for outcome in &run.outcomes {
        log_outcome(level, outcome, &resolved);
    }

    save_report(&run.report, &output, spec.format)?;
    log(level, LogLevel::Normal, &format!("Wrote {} rows to {}", run.report.len(), output.display()));
    log(level, LogLevel::Normal, &run.report.summary().to_string());

    Ok(())
}

/// Explicit output path, else the model-ID based default.
fn output_path(spec: &DriftSpec) -> Result<PathBuf> {
    match (&spec.output, spec.model_id) {
        (Some(path), _) => Ok(path.clone()),
        (None, Some(model_id)) => Ok(default_output_path(model_id, spec.format)),
        (None, None) => Err(DriftError::config_value(
            "output",
            "no output path and no model ID",
            "Pass --output <FILE> or --model-id <ID>",
        )),
    }
}

fn log_outcome(level: LogLevel, outcome: &GroupOutcome, windows: &ResolvedWindows) {
    match outcome {
        GroupOutcome::Processed { group, span, baseline_samples, target_samples, .. } => {
            log(level, LogLevel::Verbose, &format!("  datetime range: {span}"));
            log(level, LogLevel::Verbose, &format!("  baseline rows: {baseline_samples}"));
            log(level, LogLevel::Verbose, &format!("  target rows: {target_samples}"));
            log(level, LogLevel::Normal, &format!("{}: {} done", group.column(), group.value()));
        }
        GroupOutcome::Skipped { group, reason } => match reason {
            SkipReason::InvalidWindow { baseline, .. } => {
                log(
                    level,
                    LogLevel::Normal,
                    &format!(
                        "Baseline date range {} or target date range {} invalid for {}: {}",
                        windows.baseline,
                        windows.target,
                        group.column(),
                        group.value()
                    ),
                );
                log(level, LogLevel::Verbose, &format!("  {reason}"));
                if let Some(span) = baseline.span() {
                    log(level, LogLevel::Verbose, &format!("  datetime range: {span}"));
                }
            }
            SkipReason::EmptyTarget { .. } => {
                log(level, LogLevel::Normal, &format!("{}: {} skipped, {reason}", group.column(), group.value()));
            }
        },
    }
}
