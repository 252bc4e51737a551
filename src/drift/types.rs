//! Type definitions for drift detection.

use serde::Serialize;

use crate::data::Value;

/// How a feature's values are summarized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    /// Numbers; only the p-value is reported
    Numeric,
    /// Text; value frequency tables are reported as well
    Categorical,
}

impl FeatureKind {
    /// Kind of a single value, `None` for missing values.
    pub fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Text(_) => Some(FeatureKind::Categorical),
            Value::Number(n) if !n.is_nan() => Some(FeatureKind::Numeric),
            _ => None,
        }
    }

    /// Kind of a feature, decided by its first non-missing baseline value,
    /// falling back to the target. All-missing features count as numeric.
    pub fn detect(baseline: &[&Value], target: &[&Value]) -> Self {
        baseline
            .iter()
            .chain(target.iter())
            .find_map(|v| Self::of(v))
            .unwrap_or(FeatureKind::Numeric)
    }

    pub fn is_categorical(&self) -> bool {
        matches!(self, FeatureKind::Categorical)
    }
}

/// One feature's position in the drift ranking.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankedFeature {
    /// Position of the feature in the requested feature list
    pub index: usize,
    /// Feature name
    pub feature: String,
    /// P-value of the distribution test
    pub p_value: f64,
    /// `p_value < threshold`
    pub is_significant_drift: bool,
}

/// Result of comparing the baseline and target slices of one group.
#[derive(Clone, Debug, PartialEq)]
pub enum ComparisonOutcome {
    /// The target slice has no complete rows; the group contributes nothing.
    EmptyTarget,
    /// The baseline slice has no complete rows to compare against.
    EmptyBaseline,
    /// One p-value per requested feature, in feature order.
    Compared {
        p_values: Vec<f64>,
        /// Complete baseline rows fed to the test
        baseline_rows: usize,
        /// Complete target rows fed to the test
        target_rows: usize,
    },
}

impl ComparisonOutcome {
    pub fn p_values(&self) -> Option<&[f64]> {
        match self {
            ComparisonOutcome::Compared { p_values, .. } => Some(p_values),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_kind_of_value() {
        assert_eq!(FeatureKind::of(&Value::from("CHF")), Some(FeatureKind::Categorical));
        assert_eq!(FeatureKind::of(&Value::Number(1.0)), Some(FeatureKind::Numeric));
        assert_eq!(FeatureKind::of(&Value::Null), None);
        assert_eq!(FeatureKind::of(&Value::Number(f64::NAN)), None);
    }

    #[test]
    fn test_detect_uses_first_non_null_baseline_value() {
        let null = Value::Null;
        let text = Value::from("15");
        let num = Value::Number(15.0);
        assert_eq!(FeatureKind::detect(&[&null, &text, &num], &[&num]), FeatureKind::Categorical);
        assert_eq!(FeatureKind::detect(&[&null], &[&text]), FeatureKind::Categorical);
        assert_eq!(FeatureKind::detect(&[&null], &[&null]), FeatureKind::Numeric);
        assert_eq!(FeatureKind::detect(&[], &[]), FeatureKind::Numeric);
    }

    #[test]
    fn test_outcome_p_values() {
        let compared = ComparisonOutcome::Compared { p_values: vec![0.5], baseline_rows: 3, target_rows: 2 };
        assert_eq!(compared.p_values(), Some(&[0.5][..]));
        assert!(ComparisonOutcome::EmptyTarget.p_values().is_none());
    }
}
