//! Per-group drift pipeline.
//!
//! For each group: gate both windows on the group's dates, slice baseline and
//! target, compare, rank, reconcile text features, then append one row per
//! requested feature.

use super::types::{DriftReport, DriftRow, DriftRun, GroupOutcome, SampleSide, SkipReason};
use crate::data::{groups, select_rows, Dataset, DateColumn, FeatureFrame, Group};
use crate::drift::{
    rank_feature_drift, reconcile, ComparisonOutcome, DistributionTest, DriftComparator, FeatureKind,
    FrequencyTable, KolmogorovSmirnov, ReconciledTables,
};
use crate::error::{DriftError, Result};
use crate::window::{validate_window, DateWindow, WindowCheck};

/// Default significance threshold.
pub const DEFAULT_P_VALUE: f64 = 0.05;

/// Parameters of one drift run.
#[derive(Debug, Clone, PartialEq)]
pub struct DriftRequest {
    pub features: Vec<String>,
    pub datetime_col: String,
    /// Empty for an ungrouped run
    pub group_col: String,
    pub baseline: DateWindow,
    pub target: DateWindow,
    pub p_value: f64,
}

impl DriftRequest {
    pub fn new(features: Vec<String>, datetime_col: impl Into<String>, baseline: DateWindow, target: DateWindow) -> Self {
        Self {
            features,
            datetime_col: datetime_col.into(),
            group_col: String::new(),
            baseline,
            target,
            p_value: DEFAULT_P_VALUE,
        }
    }

    pub fn with_group_col(mut self, group_col: impl Into<String>) -> Self {
        self.group_col = group_col.into();
        self
    }

    pub fn with_p_value(mut self, p_value: f64) -> Self {
        self.p_value = p_value;
        self
    }
}

/// Runs a [`DriftRequest`] over every group of a dataset.
pub struct DriftReportBuilder<'a, T: DistributionTest = KolmogorovSmirnov> {
    dataset: &'a Dataset,
    request: &'a DriftRequest,
    comparator: DriftComparator<T>,
}

impl<'a> DriftReportBuilder<'a> {
    /// Builder using the KS test at the request's threshold.
    pub fn new(dataset: &'a Dataset, request: &'a DriftRequest) -> Self {
        Self { dataset, request, comparator: DriftComparator::ks(request.p_value) }
    }
}

impl<'a, T: DistributionTest> DriftReportBuilder<'a, T> {
    /// Swap in another distribution test.
    pub fn with_test<U: DistributionTest>(self, test: U) -> DriftReportBuilder<'a, U> {
        DriftReportBuilder {
            dataset: self.dataset,
            request: self.request,
            comparator: DriftComparator::new(test, self.request.p_value),
        }
    }

    /// Process all groups in order of first appearance.
    ///
    /// The datetime column is parsed once and shared by every group.
    pub fn run(&self) -> Result<DriftRun> {
        let dates = self.dataset.parse_dates(&self.request.datetime_col)?;
        let mut run = DriftRun::default();
        for group in groups(self.dataset, &self.request.group_col)? {
            let outcome = self.process_group(&group, &dates, &mut run.report)?;
            run.outcomes.push(outcome);
        }
        Ok(run)
    }

    /// Process one group, appending its rows to `report`.
    ///
    /// Invalid windows and an empty target leave `report` untouched and are
    /// returned as [`GroupOutcome::Skipped`].
    pub fn process_group(&self, group: &Group, dates: &DateColumn, report: &mut DriftReport) -> Result<GroupOutcome> {
        let req = self.request;

        let baseline_check = validate_window(&req.baseline, self.dataset, dates, group)?;
        let target_check = validate_window(&req.target, self.dataset, dates, group)?;
        let span = match baseline_check {
            WindowCheck::Valid { span, .. } if target_check.is_valid() => span,
            _ => {
                return Ok(GroupOutcome::Skipped {
                    group: group.clone(),
                    reason: SkipReason::InvalidWindow { baseline: baseline_check, target: target_check },
                });
            }
        };

        let baseline = select_rows(&req.features, self.dataset, dates, group, &req.baseline)?;
        let target = select_rows(&req.features, self.dataset, dates, group, &req.target)?;

        let p_values = match self.comparator.compare(&baseline, &target)? {
            ComparisonOutcome::Compared { p_values, .. } => p_values,
            ComparisonOutcome::EmptyTarget => {
                return Ok(GroupOutcome::Skipped {
                    group: group.clone(),
                    reason: SkipReason::EmptyTarget { target_samples: target.len() },
                });
            }
            ComparisonOutcome::EmptyBaseline => {
                return Err(DriftError::EmptyBaseline { group: group.to_string() });
            }
        };

        let mut ranked = rank_feature_drift(&p_values, &req.features, self.comparator.threshold())?;
        // Rows follow the requested feature order, not the ranking
        ranked.sort_by_key(|r| r.index);

        for feature in &ranked {
            let tables = feature_tables(&baseline, &target, &feature.feature);
            report.push(DriftRow::new(
                group,
                feature,
                side(&baseline, &feature.feature, tables.baseline),
                side(&target, &feature.feature, tables.target),
            ));
        }

        Ok(GroupOutcome::Processed {
            group: group.clone(),
            span,
            baseline_samples: baseline.len(),
            target_samples: target.len(),
            rows: ranked.len(),
        })
    }
}

fn feature_tables(baseline: &FeatureFrame, target: &FeatureFrame, feature: &str) -> ReconciledTables {
    let b = baseline.non_null(feature);
    let t = target.non_null(feature);
    if FeatureKind::detect(&b, &t).is_categorical() {
        reconcile(&b, &t)
    } else {
        ReconciledTables::default()
    }
}

fn side(frame: &FeatureFrame, feature: &str, table: FrequencyTable) -> SampleSide {
    SampleSide {
        samples: frame.len(),
        null_values: frame.null_count(feature),
        removed: frame.removed_count(),
        table,
    }
}

/// Run drift detection with the KS test.
pub fn detect_drift(dataset: &Dataset, request: &DriftRequest) -> Result<DriftRun> {
    DriftReportBuilder::new(dataset, request).run()
}
