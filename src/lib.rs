//! Driftcheck: per-group data drift monitoring
//!
//! Compares the distribution of selected features between a baseline and a
//! target date window, separately for every value of a grouping column.
//!
//! ## Architecture
//!
//! - `data`: CSV ingest, typed cells, group and window slicing
//! - `window`: default window resolution and per-group window gating
//! - `drift`: two-sample KS comparison, ranking, categorical reconciliation
//! - `report`: per-group orchestration and CSV/JSON/text output
//! - `schema`: per-group input schema checks and their JSON/CSV results
//! - `config`: YAML run spec, CLI flags and validation
//! - `cli`: command handlers for the `driftcheck` binary
//!
//! ## Example
//!
//! ```no_run
//! use driftcheck::data::load_csv;
//! use driftcheck::report::{detect_drift, DriftRequest};
//! use driftcheck::window::{resolve_windows, WindowBounds};
//!
//! # fn main() -> driftcheck::Result<()> {
//! let dataset = load_csv("discharges.csv")?;
//! let windows = resolve_windows(&dataset.parse_dates("dischargeDate")?, &WindowBounds::default())?;
//! let request = DriftRequest::new(vec!["avgHGB".into()], "dischargeDate", windows.baseline, windows.target)
//!     .with_group_col("hospitalID");
//! let run = detect_drift(&dataset, &request)?;
//! println!("{}", run.report);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod data;
pub mod drift;
pub mod error;
pub mod report;
pub mod schema;
pub mod window;

#[cfg(test)]
mod testing;

pub use error::{DriftError, Result};
