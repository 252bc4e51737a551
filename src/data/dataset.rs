//! In-memory tabular dataset.

use chrono::NaiveDateTime;

use super::dates::cell_datetime;
use super::value::Value;
use crate::error::{DriftError, Result};

/// Ordered rows of named columns. Read-only once constructed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Build a dataset from a header and rows. Every row must match the header width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        if let Some((row, values)) = rows.iter().enumerate().find(|(_, r)| r.len() != columns.len())
        {
            return Err(DriftError::RaggedRow {
                row,
                expected: columns.len(),
                actual: values.len(),
            });
        }
        Ok(Self { columns, rows })
    }

    /// Build a dataset column by column.
    pub fn from_columns<S: Into<String>>(columns: Vec<(S, Vec<Value>)>) -> Result<Self> {
        let n_rows = columns.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
        let mut names = Vec::with_capacity(columns.len());
        let mut cols = Vec::with_capacity(columns.len());
        for (name, values) in columns {
            names.push(name.into());
            cols.push(values);
        }

        let mut rows = Vec::with_capacity(n_rows);
        for i in 0..n_rows {
            let row: Vec<Value> = cols.iter().filter_map(|c| c.get(i).cloned()).collect();
            if row.len() != names.len() {
                return Err(DriftError::RaggedRow { row: i, expected: names.len(), actual: row.len() });
            }
            rows.push(row);
        }
        Ok(Self { columns: names, rows })
    }

    /// Column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows.
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns.iter().position(|c| c == name).ok_or_else(|| DriftError::MissingColumn {
            column: name.to_string(),
            available: self.columns.join(", "),
        })
    }

    /// Values of one column, in row order.
    pub fn column(&self, name: &str) -> Result<Vec<&Value>> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|r| &r[idx]).collect())
    }

    /// Parse every cell of a datetime column. Missing cells yield `None`.
    pub fn parse_dates(&self, name: &str) -> Result<DateColumn> {
        let idx = self.column_index(name)?;
        let values = self
            .rows
            .iter()
            .enumerate()
            .map(|(row, values)| cell_datetime(&values[idx], name, row))
            .collect::<Result<_>>()?;
        Ok(DateColumn { name: name.to_string(), values })
    }

    /// Distinct non-missing values of a column, in order of first appearance.
    pub fn unique_values(&self, name: &str) -> Result<Vec<Value>> {
        let mut seen: Vec<Value> = Vec::new();
        for value in self.column(name)? {
            if !value.is_null() && !seen.contains(value) {
                seen.push(value.clone());
            }
        }
        Ok(seen)
    }
}

/// A datetime column parsed once, index-aligned with the dataset's rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DateColumn {
    name: String,
    values: Vec<Option<NaiveDateTime>>,
}

impl DateColumn {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Timestamp of a row; `None` for missing cells and out-of-range rows.
    pub fn get(&self, row: usize) -> Option<NaiveDateTime> {
        self.values.get(row).copied().flatten()
    }

    /// Non-missing timestamps in row order.
    pub fn present(&self) -> impl Iterator<Item = &NaiveDateTime> + '_ {
        self.values.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
