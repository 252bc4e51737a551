//! Tabular input: cell values, datasets, CSV ingest and row selection.

pub mod dates;
mod dataset;
mod loader;
mod select;
mod value;

pub use dataset::{DateColumn, Dataset};
pub use loader::{load_csv, read_csv};
pub use select::{group_timestamps, groups, select_rows, FeatureFrame, Group};
pub use value::Value;
