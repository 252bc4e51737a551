//! Group and date-window slicing.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

use super::dataset::{DateColumn, Dataset};
use super::value::Value;
use crate::error::Result;
use crate::window::DateWindow;

/// A subset of rows sharing one value of the group column.
///
/// An empty column name denotes the whole, ungrouped dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    column: String,
    value: Value,
}

impl Group {
    /// Every row of the dataset.
    pub fn all() -> Self {
        Self { column: String::new(), value: Value::Text(String::new()) }
    }

    /// Rows where `column == value`.
    pub fn new(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self { column: column.into(), value: value.into() }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Whether this is the implicit single group of an ungrouped run.
    pub fn is_all(&self) -> bool {
        self.column.is_empty()
    }

    /// Indices of the rows belonging to this group.
    pub fn row_indices(&self, dataset: &Dataset) -> Result<Vec<usize>> {
        if self.is_all() {
            return Ok((0..dataset.len()).collect());
        }
        let idx = dataset.column_index(&self.column)?;
        Ok(dataset
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| row[idx] == self.value)
            .map(|(i, _)| i)
            .collect())
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_all() {
            f.write_str("all rows")
        } else {
            write!(f, "{}: {}", self.column, self.value)
        }
    }
}

/// Groups to process, in order of first appearance.
///
/// An empty `group_col` yields the single ungrouped group. Missing values in the
/// group column do not form a group.
pub fn groups(dataset: &Dataset, group_col: &str) -> Result<Vec<Group>> {
    if group_col.is_empty() {
        return Ok(vec![Group::all()]);
    }
    Ok(dataset
        .unique_values(group_col)?
        .into_iter()
        .map(|v| Group::new(group_col, v))
        .collect())
}

/// Timestamps of the rows in a group, missing dates dropped.
pub fn group_timestamps(dataset: &Dataset, dates: &DateColumn, group: &Group) -> Result<Vec<NaiveDateTime>> {
    Ok(group.row_indices(dataset)?.into_iter().filter_map(|i| dates.get(i)).collect())
}

/// Rows of a group inside a window, projected to the requested features.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureFrame {
    features: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl FeatureFrame {
    pub fn new(features: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { features, rows }
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of rows, nulls included.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn feature_index(&self, feature: &str) -> Option<usize> {
        self.features.iter().position(|f| f == feature)
    }

    /// Values of one feature, nulls included.
    pub fn column(&self, feature: &str) -> Vec<&Value> {
        match self.feature_index(feature) {
            Some(idx) => self.rows.iter().map(|r| &r[idx]).collect(),
            None => Vec::new(),
        }
    }

    /// Non-missing values of one feature.
    pub fn non_null(&self, feature: &str) -> Vec<&Value> {
        self.column(feature).into_iter().filter(|v| !v.is_null()).collect()
    }

    /// Missing values in one feature.
    pub fn null_count(&self, feature: &str) -> usize {
        self.column(feature).into_iter().filter(|v| v.is_null()).count()
    }

    /// Rows with no missing value in any requested feature.
    pub fn complete_rows(&self) -> Vec<&[Value]> {
        self.rows
            .iter()
            .filter(|r| r.iter().all(|v| !v.is_null()))
            .map(Vec::as_slice)
            .collect()
    }

    /// Rows dropped by a full-row null filter across all requested features.
    ///
    /// Counts a row once even if several features are missing, and counts it
    /// against every feature even if only another feature is missing.
    pub fn removed_count(&self) -> usize {
        self.len() - self.complete_rows().len()
    }
}

/// Select the rows of `group` whose date falls in `window` (both ends
/// included), projected to `features`.
///
/// The window is not validated here.
pub fn select_rows(
    features: &[String],
    dataset: &Dataset,
    dates: &DateColumn,
    group: &Group,
    window: &DateWindow,
) -> Result<FeatureFrame> {
    let indices: Vec<usize> =
        features.iter().map(|f| dataset.column_index(f)).collect::<Result<_>>()?;

    let rows = group
        .row_indices(dataset)?
        .into_iter()
        .filter(|&i| dates.get(i).is_some_and(|ts| window.contains(&ts)))
        .map(|i| {
            let row = &dataset.rows()[i];
            indices.iter().map(|&c| row[c].clone()).collect()
        })
        .collect();

    Ok(FeatureFrame::new(features.to_vec(), rows))
}
