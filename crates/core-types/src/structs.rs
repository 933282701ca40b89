use crate::enums::{BoundaryPolicy, TauMode};
use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Parses a `YYYY-MM-DD` calendar date.
///
/// A trailing time component (`2008-07-03T00:00:00`, `2008-07-03 00:00:00`) is
/// tolerated and ignored, since result files written by pandas sometimes keep it.
pub fn parse_iso_date(field: &'static str, value: &str) -> Result<NaiveDate, CoreError> {
    let trimmed = value.trim();
    let date_part = trimmed
        .split(|c| c == 'T' || c == ' ')
        .next()
        .unwrap_or(trimmed);

    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| CoreError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

/// One day's log return of the underlying price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogReturnPoint {
    pub date: NaiveDate,
    pub log_return: f64,
}

/// A structural shift detected in the series by the upstream model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangePoint {
    pub date: NaiveDate,
    pub tau: TauMode,
}

/// A real-world event associated with a change point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedEvent {
    pub change_point_date: NaiveDate,
    pub description: String,
    pub event_date: NaiveDate,
    /// Percent change in mean log return across the change point.
    /// `None` means "not available" and is never treated as zero.
    pub impact_percent: Option<f64>,

    // Extra columns written by the matching step. All are optional on the wire.
    pub event_type: Option<String>,
    pub date_diff_days: Option<i64>,
    pub mean_before: Option<f64>,
    pub mean_after: Option<f64>,
}

/// An optionally bounded date window. An unset bound is unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    #[serde(default)]
    pub policy: BoundaryPolicy,
}

impl DateRange {
    /// A range with exclusive bounds.
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            start,
            end,
            policy: BoundaryPolicy::Exclusive,
        }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Tests a single date against both bounds under the range's policy.
    pub fn contains(&self, date: NaiveDate) -> bool {
        let after_start = match (self.start, self.policy) {
            (None, _) => true,
            (Some(start), BoundaryPolicy::Exclusive) => date > start,
            (Some(start), BoundaryPolicy::Inclusive) => date >= start,
        };
        let before_end = match (self.end, self.policy) {
            (None, _) => true,
            (Some(end), BoundaryPolicy::Exclusive) => date < end,
            (Some(end), BoundaryPolicy::Inclusive) => date <= end,
        };
        after_start && before_end
    }
}
