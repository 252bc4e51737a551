//! Per-group schema validation over a loaded dataset.

use std::collections::BTreeMap;

use super::report::{SchemaCheck, SchemaReport};
use super::rules::{FeatureRule, FeatureValidator};
use crate::data::{groups, Dataset, Value};
use crate::error::Result;

/// Check every feature with a rule, separately for each group.
///
/// Rules see each group's distinct non-missing values; `n_values` counts
/// those plus one for missing values when any are present.
pub fn validate_schema(
    dataset: &Dataset,
    group_col: &str,
    rules: &BTreeMap<String, FeatureRule>,
    model_id: u32,
) -> Result<SchemaReport> {
    let columns = rules
        .iter()
        .map(|(feature, rule)| Ok((feature.as_str(), rule, dataset.column_index(feature)?)))
        .collect::<Result<Vec<_>>>()?;

    let mut report = SchemaReport::new(model_id);
    for group in groups(dataset, group_col)? {
        let rows = group.row_indices(dataset)?;
        for &(feature, rule, idx) in &columns {
            let mut distinct: Vec<&Value> = Vec::new();
            let mut has_missing = false;
            for &row in &rows {
                let value = &dataset.rows()[row][idx];
                if value.is_null() {
                    has_missing = true;
                } else if !distinct.contains(&value) {
                    distinct.push(value);
                }
            }
            report.push(SchemaCheck {
                group_col: group.column().to_string(),
                group_value: if group.is_all() { String::new() } else { group.value().to_string() },
                feature: feature.to_string(),
                status: rule.check(&distinct),
                n_values: distinct.len() + usize::from(has_missing),
            });
        }
    }
    Ok(report)
}
