//! Default baseline/target windows.
//!
//! Unset boundaries are derived from the span of the whole dataset: the target
//! covers the last 90 days, the baseline everything before that.

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::fmt;

use super::{DateWindow, ObservedSpan};
use crate::data::DateColumn;
use crate::error::{DriftError, Result};

/// Length of the default target window, in days.
pub const DEFAULT_TARGET_DAYS: i64 = 90;

/// Explicitly supplied boundaries. `None` means "use the default".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowBounds {
    pub baseline_start: Option<NaiveDate>,
    pub baseline_end: Option<NaiveDate>,
    pub target_start: Option<NaiveDate>,
    pub target_end: Option<NaiveDate>,
}

/// Which of the four boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundName {
    BaselineStart,
    BaselineEnd,
    TargetStart,
    TargetEnd,
}

impl fmt::Display for BoundName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BoundName::BaselineStart => "baseline_start",
            BoundName::BaselineEnd => "baseline_end",
            BoundName::TargetStart => "target_start",
            BoundName::TargetEnd => "target_end",
        };
        f.write_str(name)
    }
}

/// A boundary after resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedBound {
    pub name: BoundName,
    pub date: NaiveDate,
    /// Whether the date came from the default policy rather than the caller.
    pub defaulted: bool,
}

/// Baseline and target windows with all four boundaries set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedWindows {
    pub baseline: DateWindow,
    pub target: DateWindow,
    pub bounds: [ResolvedBound; 4],
    /// Span of the whole dataset the defaults were derived from.
    pub span: ObservedSpan,
}

impl ResolvedWindows {
    /// The four boundaries as date-only strings:
    /// (baseline_start, baseline_end, target_start, target_end).
    pub fn as_strings(&self) -> (String, String, String, String) {
        (self.baseline.start_str(), self.baseline.end_str(), self.target.start_str(), self.target.end_str())
    }
}

/// Fill unset boundaries from the overall span of a parsed datetime column.
///
/// - baseline_start ← earliest date
/// - baseline_end ← latest date − 90 days
/// - target_start ← latest date − 90 days
/// - target_end ← latest date
pub fn resolve_windows(dates: &DateColumn, bounds: &WindowBounds) -> Result<ResolvedWindows> {
    let span = ObservedSpan::from_timestamps(dates.present())
        .ok_or_else(|| DriftError::NoDates { column: dates.name().to_string() })?;

    let range_min = span.min.date();
    let range_max = span.max.date();
    let cutoff = range_max - Duration::days(DEFAULT_TARGET_DAYS);

    let resolve = |name, explicit: Option<NaiveDate>, default| ResolvedBound {
        name,
        date: explicit.unwrap_or(default),
        defaulted: explicit.is_none(),
    };

    let bounds = [
        resolve(BoundName::BaselineStart, bounds.baseline_start, range_min),
        resolve(BoundName::BaselineEnd, bounds.baseline_end, cutoff),
        resolve(BoundName::TargetStart, bounds.target_start, cutoff),
        resolve(BoundName::TargetEnd, bounds.target_end, range_max),
    ];

    Ok(ResolvedWindows {
        baseline: DateWindow::new(bounds[0].date, bounds[1].date),
        target: DateWindow::new(bounds[2].date, bounds[3].date),
        bounds,
        span,
    })
}
