//! Schema validation results and their JSON/CSV forms.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use super::rules::SchemaStatus;
use crate::error::{DriftError, Result};

/// Default JSON and CSV paths for a model's schema results.
pub fn default_schema_paths(model_id: u32) -> (PathBuf, PathBuf) {
    let stem = format!("model-{model_id}_schema_validation_results");
    (PathBuf::from(format!("{stem}.json")), PathBuf::from(format!("{stem}.csv")))
}

/// Outcome for one feature in one group.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaCheck {
    pub group_col: String,
    pub group_value: String,
    pub feature: String,
    pub status: SchemaStatus,
    /// Distinct values seen, with missing counted once
    pub n_values: usize,
}

impl SchemaCheck {
    fn same_slot(&self, other: &SchemaCheck) -> bool {
        self.group_col == other.group_col && self.group_value == other.group_value && self.feature == other.feature
    }

    /// One-line description used when the check fails the gate.
    pub fn describe_failure(&self) -> String {
        format!("{}: {}, {} invalid", self.group_col, self.group_value, self.feature)
    }
}

/// Every schema check of a model, keyed by (group column, group value, feature).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SchemaReport {
    pub model_id: u32,
    checks: Vec<SchemaCheck>,
}

impl SchemaReport {
    pub fn new(model_id: u32) -> Self {
        Self { model_id, checks: Vec::new() }
    }

    pub fn checks(&self) -> &[SchemaCheck] {
        &self.checks
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Add a check, replacing any earlier result for the same slot.
    pub fn push(&mut self, check: SchemaCheck) {
        match self.checks.iter_mut().find(|c| c.same_slot(&check)) {
            Some(existing) => *existing = check,
            None => self.checks.push(check),
        }
    }

    /// Fold `newer` into this report; newer results win per slot.
    pub fn merge(&mut self, newer: SchemaReport) {
        self.model_id = newer.model_id;
        for check in newer.checks {
            self.push(check);
        }
    }

    /// Checks that do not pass the gate, in insertion order.
    pub fn failures(&self) -> Vec<&SchemaCheck> {
        self.checks.iter().filter(|c| !c.status.passes_gate()).collect()
    }

    pub fn all_pass(&self) -> bool {
        self.checks.iter().all(|c| c.status.passes_gate())
    }

    fn to_document(&self) -> SchemaDocument {
        let mut schema_validation: BTreeMap<String, BTreeMap<String, BTreeMap<String, FeatureEntry>>> =
            BTreeMap::new();
        for check in &self.checks {
            schema_validation
                .entry(check.group_col.clone())
                .or_default()
                .entry(check.group_value.clone())
                .or_default()
                .insert(check.feature.clone(), FeatureEntry { status: check.status.clone(), n_vals: check.n_values });
        }
        SchemaDocument { metadata: Metadata { model_id: self.model_id }, schema_validation }
    }

    /// Serialize as the nested `metadata` / `schema_validation` document.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.to_document())
            .map_err(|e| DriftError::Serialization { message: e.to_string() })
    }

    /// Parse a document written by [`SchemaReport::to_json`].
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: SchemaDocument =
            serde_json::from_str(json).map_err(|e| DriftError::Serialization { message: e.to_string() })?;
        let mut report = SchemaReport::new(doc.metadata.model_id);
        for (group_col, values) in doc.schema_validation {
            for (group_value, features) in values {
                for (feature, entry) in features {
                    report.push(SchemaCheck {
                        group_col: group_col.clone(),
                        group_value: group_value.clone(),
                        feature,
                        status: entry.status,
                        n_values: entry.n_vals,
                    });
                }
            }
        }
        Ok(report)
    }

    /// Write one CSV row per check, header included even when empty.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        if self.is_empty() {
            wtr.write_record(SCHEMA_CSV_HEADER).map_err(|e| DriftError::csv("writing header", e))?;
        }
        for check in &self.checks {
            let record = CsvRecord {
                model_id: self.model_id,
                group_col: &check.group_col,
                group_value: &check.group_value,
                feature: &check.feature,
                status_msg: check.status.to_string(),
                n_values: check.n_values,
            };
            wtr.serialize(record)
                .map_err(|e| DriftError::csv(format!("writing schema row for '{}'", check.feature), e))?;
        }
        wtr.flush().map_err(|e| DriftError::io("flushing CSV output", e))
    }
}

/// Column names of the schema CSV.
pub const SCHEMA_CSV_HEADER: [&str; 6] = ["modelID", "group_col", "group_value", "feature", "statusMsg", "nValues"];

#[derive(Debug, Serialize)]
struct CsvRecord<'a> {
    #[serde(rename = "modelID")]
    model_id: u32,
    group_col: &'a str,
    group_value: &'a str,
    feature: &'a str,
    #[serde(rename = "statusMsg")]
    status_msg: String,
    #[serde(rename = "nValues")]
    n_values: usize,
}

#[derive(Debug, Serialize, Deserialize)]
struct SchemaDocument {
    metadata: Metadata,
    schema_validation: BTreeMap<String, BTreeMap<String, BTreeMap<String, FeatureEntry>>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Metadata {
    #[serde(rename = "modelID")]
    model_id: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct FeatureEntry {
    status: SchemaStatus,
    n_vals: usize,
}
