//! Drift detection.
//!
//! Compares a baseline slice against a target slice feature by feature:
//! - a two-sample Kolmogorov-Smirnov test gives one p-value per feature
//! - features are ranked by p-value and flagged against a threshold
//! - text features also get value frequency tables, reconciled so both sides
//!   list the same values

mod categorical;
mod comparator;
mod ranker;
mod statistical;
mod types;


pub use categorical::{reconcile, FrequencyTable, ReconciledTables, ValueFrequency};
pub use comparator::{DistributionTest, DriftComparator, KolmogorovSmirnov};
pub use ranker::rank_feature_drift;
pub use types::{ComparisonOutcome, FeatureKind, RankedFeature};

// Re-export statistical functions for advanced use
pub use statistical::{ks_p_value, ks_statistic, ks_two_sample_p_value};
