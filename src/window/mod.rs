//! Baseline/target date windows.
//!
//! - `resolver`: fills unset boundaries from the dataset's overall date span
//! - `validator`: checks a window against the span observed for one group

mod resolver;
mod validator;

pub use resolver::{resolve_windows, BoundName, ResolvedBound, ResolvedWindows, WindowBounds, DEFAULT_TARGET_DAYS};
pub use validator::{check_window, observed_span, validate_window, InvalidReason, WindowCheck};

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt;

use crate::data::dates::{midnight, parse_boundary, DATE_FORMAT};
use crate::error::Result;

/// A calendar window `[start, end]`.
///
/// Ordering is not enforced here; `validate_window` reports inverted windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Parse `YYYY-MM-DD` boundaries.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self { start: parse_boundary("start", start)?, end: parse_boundary("end", end)? })
    }

    /// Start boundary as a timestamp (midnight).
    pub fn start_datetime(&self) -> NaiveDateTime {
        midnight(self.start)
    }

    /// End boundary as a timestamp (midnight).
    pub fn end_datetime(&self) -> NaiveDateTime {
        midnight(self.end)
    }

    /// Whether a timestamp falls inside the window, both ends included.
    pub fn contains(&self, ts: &NaiveDateTime) -> bool {
        *ts >= self.start_datetime() && *ts <= self.end_datetime()
    }

    /// Start boundary as a date-only string.
    pub fn start_str(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    /// End boundary as a date-only string.
    pub fn end_str(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start_str(), self.end_str())
    }
}

/// Earliest and latest timestamps seen in a set of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ObservedSpan {
    pub min: NaiveDateTime,
    pub max: NaiveDateTime,
}

impl ObservedSpan {
    /// Span of the non-missing timestamps, or `None` if there are none.
    pub fn from_timestamps<'a, I>(timestamps: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a NaiveDateTime>,
    {
        timestamps.into_iter().fold(None, |span, ts| match span {
            None => Some(Self { min: *ts, max: *ts }),
            Some(s) => Some(Self { min: s.min.min(*ts), max: s.max.max(*ts) }),
        })
    }
}

impl fmt::Display for ObservedSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_inclusive() {
        let window = DateWindow::parse("2015-11-10", "2017-04-04").unwrap();
        let first = midnight(NaiveDate::from_ymd_opt(2015, 11, 10).unwrap());
        let last = midnight(NaiveDate::from_ymd_opt(2017, 4, 4).unwrap());
        assert!(window.contains(&first));
        assert!(window.contains(&last));
        assert!(!window.contains(&(last + chrono::Duration::seconds(1))));
        assert!(!window.contains(&(first - chrono::Duration::seconds(1))));
    }

    #[test]
    fn test_display_is_date_only() {
        let window = DateWindow::parse("2008-08-12", "2017-07-22").unwrap();
        assert_eq!(window.to_string(), "2008-08-12 to 2017-07-22");
        assert_eq!(window.start_str(), "2008-08-12");
    }

    #[test]
    fn test_span_from_timestamps() {
        let a = midnight(NaiveDate::from_ymd_opt(2017, 4, 4).unwrap());
        let b = midnight(NaiveDate::from_ymd_opt(2015, 11, 10).unwrap());
        let span = ObservedSpan::from_timestamps(&[a, b, a]).unwrap();
        assert_eq!(span.min, b);
        assert_eq!(span.max, a);
        assert!(ObservedSpan::from_timestamps(&Vec::<NaiveDateTime>::new()).is_none());
    }
}
