//! Value frequency tables for text features.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::data::Value;

/// Occurrences of one distinct value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueFrequency {
    pub value: String,
    pub count: usize,
    /// `count / non-missing total × 100`
    pub percentage: f64,
}

/// Distinct values of one sample, sorted, with counts and percentages.
///
/// After [`reconcile`], entries appended for values seen only on the other
/// side follow the sorted ones with a zero count.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FrequencyTable {
    entries: Vec<ValueFrequency>,
}

impl FrequencyTable {
    /// Count the non-missing values of a sample.
    pub fn from_values<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for value in values.into_iter().filter(|v| !v.is_null()) {
            *counts.entry(value.to_string()).or_insert(0) += 1;
        }
        let total: usize = counts.values().sum();

        let entries = counts
            .into_iter()
            .map(|(value, count)| ValueFrequency {
                value,
                count,
                percentage: count as f64 * 100.0 / total as f64,
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[ValueFrequency] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, value: &str) -> Option<&ValueFrequency> {
        self.entries.iter().find(|e| e.value == value)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.get(value).is_some()
    }

    pub fn values(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.value.as_str()).collect()
    }

    pub fn counts(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.count).collect()
    }

    pub fn percentages(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.percentage).collect()
    }

    /// Append a zero entry for every value of `other` missing here.
    fn pad_missing(&mut self, other: &FrequencyTable) {
        for entry in &other.entries {
            if !self.contains(&entry.value) {
                self.entries.push(ValueFrequency { value: entry.value.clone(), count: 0, percentage: 0.0 });
            }
        }
    }
}

/// Baseline and target tables over the same set of values.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ReconciledTables {
    pub baseline: FrequencyTable,
    pub target: FrequencyTable,
}

/// Build both tables and pad each with the values only the other side has.
///
/// The baseline is padded first, with target-only values in target order,
/// then the target with baseline-only values in baseline order.
pub fn reconcile(baseline: &[&Value], target: &[&Value]) -> ReconciledTables {
    let mut baseline = FrequencyTable::from_values(baseline.iter().copied());
    let mut target = FrequencyTable::from_values(target.iter().copied());

    baseline.pad_missing(&target);
    target.pad_missing(&baseline);

    ReconciledTables { baseline, target }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn texts(values: &[&str]) -> Vec<Value> {
        values.iter().map(|v| Value::from(*v)).collect()
    }

    #[test]
    fn test_table_is_sorted_with_percentages() {
        let values = texts(&["CHF", "ACS", "CHF", "CHF"]);
        let table = FrequencyTable::from_values(&values);
        assert_eq!(table.values(), vec!["ACS", "CHF"]);
        assert_eq!(table.counts(), vec![1, 3]);
        assert_abs_diff_eq!(table.percentages()[0], 25.0);
        assert_abs_diff_eq!(table.percentages()[1], 75.0);
    }

    #[test]
    fn test_nulls_are_not_counted() {
        let mut values = texts(&["a", "b"]);
        values.push(Value::Null);
        let table = FrequencyTable::from_values(&values);
        assert_eq!(table.counts(), vec![1, 1]);
        assert_abs_diff_eq!(table.percentages()[0], 50.0);
    }

    #[test]
    fn test_reconcile_pads_both_sides() {
        let baseline = texts(&["ACS", "CHF", "CHF", "Aneurysm"]);
        let target = texts(&["CHF", "Seizures", "Seizures"]);
        let b: Vec<&Value> = baseline.iter().collect();
        let t: Vec<&Value> = target.iter().collect();

        let tables = reconcile(&b, &t);
        assert_eq!(tables.baseline.values(), vec!["ACS", "Aneurysm", "CHF", "Seizures"]);
        assert_eq!(tables.baseline.counts(), vec![1, 1, 2, 0]);
        assert_eq!(tables.target.values(), vec!["CHF", "Seizures", "ACS", "Aneurysm"]);
        assert_eq!(tables.target.counts(), vec![1, 2, 0, 0]);
        assert_abs_diff_eq!(tables.target.get("ACS").unwrap().percentage, 0.0);
        assert_abs_diff_eq!(tables.target.get("Seizures").unwrap().percentage, 200.0 / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_reconcile_identical_sets_unchanged() {
        let values = texts(&["x", "y"]);
        let v: Vec<&Value> = values.iter().collect();
        let tables = reconcile(&v, &v);
        assert_eq!(tables.baseline, tables.target);
        assert_eq!(tables.baseline.len(), 2);
    }

    #[test]
    fn test_reconcile_empty_side() {
        let values = texts(&["x"]);
        let v: Vec<&Value> = values.iter().collect();
        let tables = reconcile(&v, &[]);
        assert_eq!(tables.target.values(), vec!["x"]);
        assert_eq!(tables.target.counts(), vec![0]);
    }
}
