//! Core CLI types - Cli, Command, and argument structs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::types::OutputFormat;
use crate::config::features::parse_feature_list;
use crate::config::schema::DriftSpec;

/// Driftcheck: per-group data drift monitoring
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "driftcheck")]
#[command(version)]
#[command(about = "Per-group distribution drift between a baseline and a target date window")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Compute drift for every group and feature and write the report
    Drift(DriftArgs),

    /// Show the resolved windows and whether each group can use them
    Windows(WindowsArgs),

    /// Check each group's feature values against the run spec's schema rules
    Validate(ValidateArgs),
}

/// Dataset and window arguments shared by all commands
#[derive(Parser, Debug, Clone, PartialEq, Default)]
pub struct SourceArgs {
    /// YAML run spec; flags given here override its values
    #[arg(long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to the data in CSV format
    #[arg(short = 'x', long, value_name = "CSV")]
    pub data: Option<PathBuf>,

    /// Column holding the datetime of each row
    #[arg(short = 't', long)]
    pub datetime_col: Option<String>,

    /// Column to group results by (empty for a single group)
    #[arg(short = 'g', long)]
    pub group_col: Option<String>,

    /// Baseline start date (YYYY-MM-DD)
    #[arg(short = 'a', long)]
    pub baseline_start: Option<String>,

    /// Baseline end date (YYYY-MM-DD)
    #[arg(short = 'b', long)]
    pub baseline_end: Option<String>,

    /// Target start date (YYYY-MM-DD)
    #[arg(short = 'c', long)]
    pub target_start: Option<String>,

    /// Target end date (YYYY-MM-DD)
    #[arg(short = 'd', long)]
    pub target_end: Option<String>,
}

/// Arguments for the drift command
#[derive(Parser, Debug, Clone, PartialEq, Default)]
pub struct DriftArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Model ID, used in the default output file name
    #[arg(short = 'i', long)]
    pub model_id: Option<u32>,

    /// Comma separated features to monitor (e.g. featureName1,featureName2)
    #[arg(short = 'f', long)]
    pub features: Option<String>,

    /// Significance threshold for drift
    #[arg(short = 'p', long)]
    pub p_value: Option<f64>,

    /// Output file (default: model-<ID>_distribution_drift_results.<ext>)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Output format (csv, json, text)
    #[arg(long)]
    pub format: Option<OutputFormat>,
}

/// Arguments for the windows command
#[derive(Parser, Debug, Clone, PartialEq, Default)]
pub struct WindowsArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq, Default)]
pub struct ValidateArgs {
    /// YAML run spec holding the `schema:` rules
    #[arg(long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to the data in CSV format
    #[arg(short = 'x', long, value_name = "CSV")]
    pub data: Option<PathBuf>,

    /// Column to group results by (empty for a single group)
    #[arg(short = 'g', long)]
    pub group_col: Option<String>,

    /// Model ID, used in the default output file names
    #[arg(short = 'i', long)]
    pub model_id: Option<u32>,

    /// Comma separated features to check (default: every feature with a rule)
    #[arg(short = 'f', long)]
    pub features: Option<String>,

    /// Output path; written with .json and .csv extensions
    /// (default: model-<ID>_schema_validation_results.{json,csv})
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Apply dataset and window overrides to a DriftSpec
pub fn apply_source_overrides(spec: &mut DriftSpec, args: &SourceArgs) {
    if let Some(data) = &args.data {
        spec.data = Some(data.clone());
    }
    if let Some(col) = &args.datetime_col {
        spec.datetime_col = col.clone();
    }
    if let Some(col) = &args.group_col {
        spec.group_col = col.clone();
    }
    if let Some(date) = &args.baseline_start {
        spec.baseline_start = Some(date.clone());
    }
    if let Some(date) = &args.baseline_end {
        spec.baseline_end = Some(date.clone());
    }
    if let Some(date) = &args.target_start {
        spec.target_start = Some(date.clone());
    }
    if let Some(date) = &args.target_end {
        spec.target_end = Some(date.clone());
    }
}

/// Apply command-line overrides to a DriftSpec
pub fn apply_overrides(spec: &mut DriftSpec, args: &DriftArgs) {
    apply_source_overrides(spec, &args.source);
    if let Some(model_id) = args.model_id {
        spec.model_id = Some(model_id);
    }
    if let Some(features) = &args.features {
        spec.features = parse_feature_list(features);
    }
    if let Some(p_value) = args.p_value {
        spec.p_value = p_value;
    }
    if let Some(output) = &args.output {
        spec.output = Some(output.clone());
    }
    if let Some(format) = args.format {
        spec.format = format;
    }
}

/// Apply validate command overrides to a DriftSpec
pub fn apply_validate_overrides(spec: &mut DriftSpec, args: &ValidateArgs) {
    if let Some(data) = &args.data {
        spec.data = Some(data.clone());
    }
    if let Some(col) = &args.group_col {
        spec.group_col = col.clone();
    }
    if let Some(model_id) = args.model_id {
        spec.model_id = Some(model_id);
    }
    if let Some(features) = &args.features {
        spec.features = parse_feature_list(features);
    }
    if let Some(output) = &args.output {
        spec.output = Some(output.clone());
    }
}
