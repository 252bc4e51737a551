//! Validate command implementation

use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use super::windows::load_dataset;
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{apply_validate_overrides, load_spec, validate_schema_spec, DriftSpec, ValidateArgs};
use crate::error::{DriftError, Result};
use crate::schema::{default_schema_paths, validate_schema, FeatureRule, SchemaReport};

pub fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<()> {
    let mut spec = match &args.config {
        Some(path) => load_spec(path)?,
        None => DriftSpec::default(),
    };
    apply_validate_overrides(&mut spec, &args);
    validate_schema_spec(&spec)?;
    let (json_path, csv_path) = output_paths(&spec)?;

    let dataset = load_dataset(&spec, level)?;
    let model_id = spec.model_id.unwrap_or_default();
    let report = validate_schema(&dataset, &spec.group_col, &selected_rules(&spec), model_id)?;
    for check in report.checks() {
        log(
            level,
            LogLevel::Verbose,
            &format!("  {}: {}, {}: {} ({} values)", check.group_col, check.group_value, check.feature, check.status, check.n_values),
        );
    }

    let merged = merge_with_existing(report.clone(), &json_path, level)?;
    write_results(&merged, &json_path, &csv_path)?;

    let failures: Vec<String> = report.failures().iter().map(|c| c.describe_failure()).collect();
    if !failures.is_empty() {
        log(level, LogLevel::Normal, "Input schema invalid for the following features in respective groups...");
        for failure in &failures {
            log(level, LogLevel::Normal, &format!("  {failure}"));
        }
        return Err(DriftError::SchemaInvalid { failures });
    }

    log(
        level,
        LogLevel::Normal,
        "Input schema validation for all specified features successful. No invalid input detected.",
    );
    Ok(())
}

/// Rules for the requested features, or all rules when none are listed.
fn selected_rules(spec: &DriftSpec) -> BTreeMap<String, FeatureRule> {
    if spec.features.is_empty() {
        return spec.schema.clone();
    }
    spec.schema.iter().filter(|(feature, _)| spec.features.contains(feature)).map(|(f, r)| (f.clone(), r.clone())).collect()
}

/// JSON and CSV paths from `--output`, else the model-ID based defaults.
fn output_paths(spec: &DriftSpec) -> Result<(PathBuf, PathBuf)> {
    match (&spec.output, spec.model_id) {
        (Some(path), _) => Ok((path.with_extension("json"), path.with_extension("csv"))),
        (None, Some(model_id)) => Ok(default_schema_paths(model_id)),
        (None, None) => Err(DriftError::config_value(
            "output",
            "no output path and no model ID",
            "Pass --output <FILE> or --model-id <ID>",
        )),
    }
}

/// Fold this run's results into an earlier JSON report at `path`, if any.
fn merge_with_existing(report: SchemaReport, path: &Path, level: LogLevel) -> Result<SchemaReport> {
    if !path.exists() {
        log(level, LogLevel::Verbose, &format!("Creating {}", path.display()));
        return Ok(report);
    }
    log(level, LogLevel::Verbose, &format!("Updating {}", path.display()));
    let json = std::fs::read_to_string(path).map_err(|e| DriftError::io(format!("reading {}", path.display()), e))?;
    let mut existing = SchemaReport::from_json(&json)?;
    existing.merge(report);
    Ok(existing)
}

fn write_results(report: &SchemaReport, json_path: &Path, csv_path: &Path) -> Result<()> {
    let json = report.to_json()?;
    std::fs::write(json_path, format!("{json}\n"))
        .map_err(|e| DriftError::io(format!("writing {}", json_path.display()), e))?;
    let file = File::create(csv_path).map_err(|e| DriftError::io(format!("creating {}", csv_path.display()), e))?;
    report.write_csv(file)
}
