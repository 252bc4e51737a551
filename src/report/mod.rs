//! Drift report assembly and output.

mod builder;
mod output;
mod types;

pub use builder::{detect_drift, DriftReportBuilder, DriftRequest, DEFAULT_P_VALUE};
pub use output::{default_output_path, save_report, to_json, write_csv, CSV_HEADER};
pub use types::{DriftReport, DriftRow, DriftRun, GroupOutcome, ReportSummary, SampleSide, SkipReason};
