//! Report rows and per-group outcomes.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use crate::data::Group;
use crate::drift::{FrequencyTable, RankedFeature};
use crate::window::{ObservedSpan, WindowCheck};

/// Sample bookkeeping for one side of a comparison.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSide {
    /// Rows in the slice, missing values included
    pub samples: usize,
    /// Missing values of this feature
    pub null_values: usize,
    /// Rows dropped because any requested feature was missing
    pub removed: usize,
    /// Value frequencies; empty for numeric features
    pub table: FrequencyTable,
}

/// One (group, feature) result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftRow {
    #[serde(rename = "group_col")]
    pub group_col: String,
    #[serde(rename = "group_value")]
    pub group_value: String,
    pub feature: String,
    pub p_value: f64,
    pub is_significant_drift: bool,
    pub baseline_samples: usize,
    pub baseline_null_values: usize,
    pub baseline_removed: usize,
    pub baseline_values: Vec<String>,
    pub baseline_value_counts: Vec<usize>,
    pub baseline_value_percentages: Vec<f64>,
    pub target_samples: usize,
    pub target_null_values: usize,
    pub target_removed: usize,
    pub target_values: Vec<String>,
    pub target_value_counts: Vec<usize>,
    pub target_value_percentages: Vec<f64>,
}

impl DriftRow {
    pub fn new(group: &Group, ranked: &RankedFeature, baseline: SampleSide, target: SampleSide) -> Self {
        let strings = |t: &FrequencyTable| -> Vec<String> { t.values().into_iter().map(str::to_string).collect() };
        Self {
            group_col: group.column().to_string(),
            group_value: group.value().to_string(),
            feature: ranked.feature.clone(),
            p_value: ranked.p_value,
            is_significant_drift: ranked.is_significant_drift,
            baseline_samples: baseline.samples,
            baseline_null_values: baseline.null_values,
            baseline_removed: baseline.removed,
            baseline_values: strings(&baseline.table),
            baseline_value_counts: baseline.table.counts(),
            baseline_value_percentages: baseline.table.percentages(),
            target_samples: target.samples,
            target_null_values: target.null_values,
            target_removed: target.removed,
            target_values: strings(&target.table),
            target_value_counts: target.table.counts(),
            target_value_percentages: target.table.percentages(),
        }
    }
}

/// Rows accumulated over a run, in group order then feature order.
///
/// Append-only: rows are never changed once pushed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DriftReport {
    rows: Vec<DriftRow>,
}

impl DriftReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: DriftRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[DriftRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get summary of the report
    pub fn summary(&self) -> ReportSummary {
        let groups: BTreeSet<(&str, &str)> =
            self.rows.iter().map(|r| (r.group_col.as_str(), r.group_value.as_str())).collect();
        let features: BTreeSet<&str> = self.rows.iter().map(|r| r.feature.as_str()).collect();
        ReportSummary {
            rows: self.rows.len(),
            significant: self.rows.iter().filter(|r| r.is_significant_drift).count(),
            groups: groups.len(),
            features: features.len(),
        }
    }
}

/// Summary of a drift report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    /// Total (group, feature) rows
    pub rows: usize,
    /// Rows flagged as significant drift
    pub significant: usize,
    /// Distinct groups with at least one row
    pub groups: usize,
    /// Distinct features with at least one row
    pub features: usize,
}

impl ReportSummary {
    /// Whether any drift was detected
    pub fn has_drift(&self) -> bool {
        self.significant > 0
    }

    /// Percentage of rows that drifted
    pub fn drift_percentage(&self) -> f64 {
        if self.rows == 0 {
            0.0
        } else {
            100.0 * self.significant as f64 / self.rows as f64
        }
    }
}

impl fmt::Display for ReportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows across {} groups and {} features, {} significant ({:.1}%)",
            self.rows,
            self.groups,
            self.features,
            self.significant,
            self.drift_percentage()
        )
    }
}

/// Why a group contributed no rows.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// The baseline or target window does not fit the group's dates.
    InvalidWindow { baseline: WindowCheck, target: WindowCheck },
    /// No complete target rows remained after dropping missing values.
    EmptyTarget { target_samples: usize },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::InvalidWindow { baseline, target } => {
                let side = |check: &WindowCheck| match check.reason() {
                    Some(reason) => format!("invalid ({reason})"),
                    None => "valid".to_string(),
                };
                write!(f, "baseline window {}, target window {}", side(baseline), side(target))
            }
            SkipReason::EmptyTarget { target_samples } => {
                write!(f, "no complete target rows out of {target_samples}")
            }
        }
    }
}

/// What happened to one group.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupOutcome {
    Processed {
        group: Group,
        /// Earliest and latest dates of the group
        span: ObservedSpan,
        baseline_samples: usize,
        target_samples: usize,
        /// Rows appended to the report
        rows: usize,
    },
    Skipped { group: Group, reason: SkipReason },
}

impl GroupOutcome {
    pub fn group(&self) -> &Group {
        match self {
            GroupOutcome::Processed { group, .. } | GroupOutcome::Skipped { group, .. } => group,
        }
    }

    pub fn is_processed(&self) -> bool {
        matches!(self, GroupOutcome::Processed { .. })
    }
}

/// A finished run: the report plus one outcome per group, in group order.
#[derive(Debug, Clone, Default)]
pub struct DriftRun {
    pub report: DriftReport,
    pub outcomes: Vec<GroupOutcome>,
}

impl DriftRun {
    pub fn skipped(&self) -> impl Iterator<Item = &GroupOutcome> {
        self.outcomes.iter().filter(|o| !o.is_processed())
    }
}
