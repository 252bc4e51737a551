//! Report writers: CSV, JSON and a plain-text table.

use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::types::{DriftReport, DriftRow};
use crate::config::OutputFormat;
use crate::error::{DriftError, Result};

/// File name used when no output path is given.
pub fn default_output_path(model_id: u32, format: OutputFormat) -> PathBuf {
    PathBuf::from(format!("model-{model_id}_distribution_drift_results.{}", format.extension()))
}

/// A report row flattened for CSV, list columns rendered as bracketed lists.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CsvRecord<'a> {
    #[serde(rename = "group_col")]
    group_col: &'a str,
    #[serde(rename = "group_value")]
    group_value: &'a str,
    feature: &'a str,
    p_value: f64,
    is_significant_drift: bool,
    baseline_samples: usize,
    baseline_null_values: usize,
    baseline_removed: usize,
    baseline_values: String,
    baseline_value_counts: String,
    baseline_value_percentages: String,
    target_samples: usize,
    target_null_values: usize,
    target_removed: usize,
    target_values: String,
    target_value_counts: String,
    target_value_percentages: String,
}

impl<'a> From<&'a DriftRow> for CsvRecord<'a> {
    fn from(row: &'a DriftRow) -> Self {
        Self {
            group_col: &row.group_col,
            group_value: &row.group_value,
            feature: &row.feature,
            p_value: row.p_value,
            is_significant_drift: row.is_significant_drift,
            baseline_samples: row.baseline_samples,
            baseline_null_values: row.baseline_null_values,
            baseline_removed: row.baseline_removed,
            baseline_values: list(row.baseline_values.iter().map(|v| quote(v))),
            baseline_value_counts: list(row.baseline_value_counts.iter().map(ToString::to_string)),
            baseline_value_percentages: percentages(&row.baseline_value_percentages, &row.baseline_value_counts),
            target_samples: row.target_samples,
            target_null_values: row.target_null_values,
            target_removed: row.target_removed,
            target_values: list(row.target_values.iter().map(|v| quote(v))),
            target_value_counts: list(row.target_value_counts.iter().map(ToString::to_string)),
            target_value_percentages: percentages(&row.target_value_percentages, &row.target_value_counts),
        }
    }
}

fn list(items: impl Iterator<Item = String>) -> String {
    format!("[{}]", items.collect::<Vec<_>>().join(", "))
}

/// Single-quoted, switching to double quotes when the value holds a single
/// quote and no double quote.
fn quote(value: &str) -> String {
    if value.contains('\'') && !value.contains('"') {
        return format!("\"{}\"", value.replace('\\', "\\\\"));
    }
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Observed shares as floats; padded (zero-count) entries as a bare `0`.
fn percentages(shares: &[f64], counts: &[usize]) -> String {
    list(shares.iter().zip(counts).map(|(p, &count)| if count == 0 { "0".to_string() } else { float(*p) }))
}

/// Integral floats keep a trailing `.0`.
fn float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Write the report as CSV with a header row.
pub fn write_csv<W: Write>(report: &DriftReport, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    if report.is_empty() {
        wtr.write_record(CSV_HEADER).map_err(|e| DriftError::csv("writing header", e))?;
    }
    for row in report.rows() {
        wtr.serialize(CsvRecord::from(row)).map_err(|e| DriftError::csv(format!("writing row for '{}'", row.feature), e))?;
    }
    wtr.flush().map_err(|e| DriftError::io("flushing CSV output", e))
}

/// Column names, also written for an empty report.
pub const CSV_HEADER: [&str; 17] = [
    "group_col",
    "group_value",
    "feature",
    "pValue",
    "isSignificantDrift",
    "baselineSamples",
    "baselineNullValues",
    "baselineRemoved",
    "baselineValues",
    "baselineValueCounts",
    "baselineValuePercentages",
    "targetSamples",
    "targetNullValues",
    "targetRemoved",
    "targetValues",
    "targetValueCounts",
    "targetValuePercentages",
];

/// Serialize the report as a pretty-printed JSON array.
pub fn to_json(report: &DriftReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(|e| DriftError::Serialization { message: e.to_string() })
}

/// Save the report to `path` in the given format.
pub fn save_report(report: &DriftReport, path: &Path, format: OutputFormat) -> Result<()> {
    let mut file =
        File::create(path).map_err(|e| DriftError::io(format!("creating {}", path.display()), e))?;
    match format {
        OutputFormat::Csv => write_csv(report, file),
        OutputFormat::Json => {
            let json = to_json(report)?;
            writeln!(file, "{json}").map_err(|e| DriftError::io(format!("writing {}", path.display()), e))
        }
        OutputFormat::Text => {
            write!(file, "{report}").map_err(|e| DriftError::io(format!("writing {}", path.display()), e))
        }
    }
}

impl fmt::Display for DriftReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "Drift report: (empty)");
        }

        let feature_width = self.rows().iter().map(|r| r.feature.len()).max().unwrap_or(7).max(7);

        let mut start = 0;
        while start < self.len() {
            let rows = self.rows();
            let head = &rows[start];
            let end = rows[start..]
                .iter()
                .position(|r| r.group_col != head.group_col || r.group_value != head.group_value)
                .map_or(rows.len(), |n| start + n);

            if head.group_col.is_empty() {
                writeln!(f, "All rows")?;
            } else {
                writeln!(f, "{}: {}", head.group_col, head.group_value)?;
            }

            writeln!(f, "┌{:─<width$}┬{:─<12}┬{:─<7}┬{:─<10}┬{:─<10}┐", "", "", "", "", "", width = feature_width + 2)?;
            writeln!(
                f,
                "│ {:width$} │ {:>10} │ {:5} │ {:>8} │ {:>8} │",
                "Feature",
                "p-value",
                "Drift",
                "Baseline",
                "Target",
                width = feature_width
            )?;
            writeln!(f, "├{:─<width$}┼{:─<12}┼{:─<7}┼{:─<10}┼{:─<10}┤", "", "", "", "", "", width = feature_width + 2)?;

            let mut group: Vec<&DriftRow> = rows[start..end].iter().collect();
            group.sort_by(|a, b| a.p_value.total_cmp(&b.p_value));
            for row in group {
                writeln!(
                    f,
                    "│ {:width$} │ {:>10.6} │ {:5} │ {:>8} │ {:>8} │",
                    row.feature,
                    row.p_value,
                    if row.is_significant_drift { "YES" } else { "no" },
                    row.baseline_samples,
                    row.target_samples,
                    width = feature_width
                )?;
            }

            writeln!(f, "└{:─<width$}┴{:─<12}┴{:─<7}┴{:─<10}┴{:─<10}┘", "", "", "", "", "", width = feature_width + 2)?;
            start = end;
        }

        writeln!(f, "{}", self.summary())
    }
}
