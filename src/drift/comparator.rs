//! Baseline vs. target comparison.

use super::statistical::{ks_statistic, ks_two_sample_p_value};
use super::types::ComparisonOutcome;
use crate::data::{FeatureFrame, Value};
use crate::error::{DriftError, Result};

/// A two-sample distributional equality test applied column by column.
pub trait DistributionTest {
    /// Name used in diagnostics
    fn name(&self) -> &'static str;

    /// One p-value per column. `reference` and `current` are rows of equal
    /// width without missing values.
    fn p_values(&self, reference: &[&[Value]], current: &[&[Value]]) -> Result<Vec<f64>>;
}

/// Two-sided two-sample Kolmogorov-Smirnov test.
///
/// Values are ordered by [`Value::rank_cmp`], so text columns are compared
/// by their lexicographic order.
#[derive(Debug, Clone, Copy, Default)]
pub struct KolmogorovSmirnov;

impl DistributionTest for KolmogorovSmirnov {
    fn name(&self) -> &'static str {
        "Kolmogorov-Smirnov"
    }

    fn p_values(&self, reference: &[&[Value]], current: &[&[Value]]) -> Result<Vec<f64>> {
        let width = reference.first().or(current.first()).map_or(0, |row| row.len());

        (0..width)
            .map(|col| {
                let (Some(a), Some(b)) = (column(reference, col), column(current, col)) else {
                    return Err(DriftError::StatisticalTest {
                        test: self.name().to_string(),
                        feature: format!("column {col}"),
                        message: format!("rows narrower than {width} values"),
                    });
                };
                let d = ks_statistic(&a, &b, |x, y| x.rank_cmp(y));
                Ok(ks_two_sample_p_value(d, a.len(), b.len()))
            })
            .collect()
    }
}

fn column<'a>(rows: &[&'a [Value]], col: usize) -> Option<Vec<&'a Value>> {
    rows.iter().map(|row| row.get(col)).collect()
}

/// Runs a [`DistributionTest`] on the complete rows of two slices.
#[derive(Debug, Clone)]
pub struct DriftComparator<T: DistributionTest = KolmogorovSmirnov> {
    test: T,
    threshold: f64,
}

impl DriftComparator<KolmogorovSmirnov> {
    /// Comparator using the KS test.
    pub fn ks(threshold: f64) -> Self {
        Self::new(KolmogorovSmirnov, threshold)
    }
}

impl<T: DistributionTest> DriftComparator<T> {
    pub fn new(test: T, threshold: f64) -> Self {
        Self { test, threshold }
    }

    /// Significance threshold drift is judged against
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Compare baseline against target, the baseline being the reference.
    ///
    /// Rows with a missing value in any requested feature are dropped from
    /// each side independently. An empty target is reported before an empty
    /// baseline.
    pub fn compare(&self, baseline: &FeatureFrame, target: &FeatureFrame) -> Result<ComparisonOutcome> {
        let current = target.complete_rows();
        if current.is_empty() {
            return Ok(ComparisonOutcome::EmptyTarget);
        }
        let reference = baseline.complete_rows();
        if reference.is_empty() {
            return Ok(ComparisonOutcome::EmptyBaseline);
        }

        let p_values = self.test.p_values(&reference, &current)?;

        let features = baseline.features();
        if p_values.len() != features.len() {
            return Err(DriftError::FeatureCountMismatch {
                features: features.len(),
                p_values: p_values.len(),
            });
        }
        if let Some(idx) = p_values.iter().position(|p| !(0.0..=1.0).contains(p)) {
            return Err(DriftError::StatisticalTest {
                test: self.test.name().to_string(),
                feature: features[idx].clone(),
                message: format!("p-value {} is outside [0, 1]", p_values[idx]),
            });
        }

        Ok(ComparisonOutcome::Compared {
            p_values,
            baseline_rows: reference.len(),
            target_rows: current.len(),
        })
    }
}
