//! CSV ingest with per-column type inference.
//!
//! A column whose non-missing cells all parse as numbers becomes numeric;
//! otherwise every non-missing cell is kept as text. The numeric/categorical
//! handling of a feature therefore never varies between rows.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::dataset::Dataset;
use super::value::Value;
use crate::error::{DriftError, Result};

const NULL_TOKENS: [&str; 6] = ["", "na", "nan", "null", "none", "n/a"];

/// Load a CSV file with a header row.
pub fn load_csv(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| DriftError::io(format!("opening {}", path.display()), e))?;
    read_csv(file).map_err(|e| match e {
        DriftError::Csv { context, source } => {
            DriftError::Csv { context: format!("{context} in {}", path.display()), source }
        }
        other => other,
    })
}

/// Read CSV data with a header row from any reader.
pub fn read_csv<R: Read>(reader: R) -> Result<Dataset> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| DriftError::csv("reading header", e))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut raw_columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for (line, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| DriftError::csv(format!("reading record {line}"), e))?;
        for (col, cell) in raw_columns.iter_mut().zip(record.iter()) {
            col.push(if is_null_token(cell) { None } else { Some(cell.to_string()) });
        }
    }

    let columns = headers.into_iter().zip(raw_columns.into_iter().map(infer_column)).collect();
    Dataset::from_columns(columns)
}

fn is_null_token(cell: &str) -> bool {
    NULL_TOKENS.iter().any(|t| cell.eq_ignore_ascii_case(t))
}

fn infer_column(cells: Vec<Option<String>>) -> Vec<Value> {
    let parsed: Option<Vec<Option<f64>>> = cells
        .iter()
        .map(|c| match c {
            None => Some(None),
            Some(s) => s.parse::<f64>().ok().map(Some),
        })
        .collect();

    match parsed {
        Some(numbers) => numbers.into_iter().map(Value::from).collect(),
        None => cells.into_iter().map(Value::from).collect(),
    }
}
