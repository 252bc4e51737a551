//! Feature ranking by drift significance.

use super::types::RankedFeature;
use crate::error::{DriftError, Result};

/// Rank features by ascending p-value, most likely drifted first.
///
/// `p_values` and `features` must be index-aligned. The sort is stable, so
/// tied p-values keep their original relative order. A feature is flagged
/// when `p_value < threshold`; equality is not significant.
pub fn rank_feature_drift(p_values: &[f64], features: &[String], threshold: f64) -> Result<Vec<RankedFeature>> {
    if p_values.len() != features.len() {
        return Err(DriftError::FeatureCountMismatch { features: features.len(), p_values: p_values.len() });
    }

    let mut order: Vec<usize> = (0..p_values.len()).collect();
    order.sort_by(|&a, &b| p_values[a].total_cmp(&p_values[b]));

    Ok(order
        .into_iter()
        .map(|i| RankedFeature {
            index: i,
            feature: features[i].clone(),
            p_value: p_values[i],
            is_significant_drift: p_values[i] < threshold,
        })
        .collect())
}
