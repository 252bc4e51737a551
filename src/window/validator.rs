//! Window gating per group.

use serde::Serialize;
use std::fmt;

use super::{DateWindow, ObservedSpan};
use crate::data::{group_timestamps, Dataset, DateColumn, Group};
use crate::error::Result;

/// Why a window cannot be used for a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    /// The group has no dated rows.
    NoData,
    /// The window starts at or after the group's latest date.
    StartsAfterData,
    /// The window ends at or before the group's earliest date.
    EndsBeforeData,
    /// The window does not start before it ends.
    Inverted,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            InvalidReason::NoData => "no dated rows",
            InvalidReason::StartsAfterData => "starts after the latest date",
            InvalidReason::EndsBeforeData => "ends before the earliest date",
            InvalidReason::Inverted => "start is not before end",
        };
        f.write_str(msg)
    }
}

/// Outcome of checking a window against a group's observed span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WindowCheck {
    Valid { window: DateWindow, span: ObservedSpan },
    Invalid { window: DateWindow, reason: InvalidReason, span: Option<ObservedSpan> },
}

impl WindowCheck {
    pub fn is_valid(&self) -> bool {
        matches!(self, WindowCheck::Valid { .. })
    }

    pub fn window(&self) -> &DateWindow {
        match self {
            WindowCheck::Valid { window, .. } | WindowCheck::Invalid { window, .. } => window,
        }
    }

    /// Earliest/latest dates seen for the group, for diagnostics.
    pub fn span(&self) -> Option<&ObservedSpan> {
        match self {
            WindowCheck::Valid { span, .. } => Some(span),
            WindowCheck::Invalid { span, .. } => span.as_ref(),
        }
    }

    pub fn reason(&self) -> Option<InvalidReason> {
        match self {
            WindowCheck::Valid { .. } => None,
            WindowCheck::Invalid { reason, .. } => Some(*reason),
        }
    }
}

/// Check a window against an observed span.
///
/// Valid iff `start < max`, `end > min` and `start < end`.
pub fn check_window(window: &DateWindow, span: &ObservedSpan) -> WindowCheck {
    let start = window.start_datetime();
    let end = window.end_datetime();

    let reason = if start >= span.max {
        Some(InvalidReason::StartsAfterData)
    } else if end <= span.min {
        Some(InvalidReason::EndsBeforeData)
    } else if start >= end {
        Some(InvalidReason::Inverted)
    } else {
        None
    };

    match reason {
        None => WindowCheck::Valid { window: *window, span: *span },
        Some(reason) => WindowCheck::Invalid { window: *window, reason, span: Some(*span) },
    }
}

/// Span of the dated rows in a group.
pub fn observed_span(dataset: &Dataset, dates: &DateColumn, group: &Group) -> Result<Option<ObservedSpan>> {
    let timestamps = group_timestamps(dataset, dates, group)?;
    Ok(ObservedSpan::from_timestamps(&timestamps))
}

/// Check a window against the dates of one group (all rows when ungrouped).
///
/// An invalid window is an outcome, not an error; errors are reserved for
/// a missing group column.
pub fn validate_window(
    window: &DateWindow,
    dataset: &Dataset,
    dates: &DateColumn,
    group: &Group,
) -> Result<WindowCheck> {
    Ok(match observed_span(dataset, dates, group)? {
        Some(span) => check_window(window, &span),
        None => WindowCheck::Invalid { window: *window, reason: InvalidReason::NoData, span: None },
    })
}
