//! Reporting-period filtering on completion timestamps.

use crate::types::Task;
use chrono::{FixedOffset, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Milliseconds from the start of a day to its last millisecond.
pub const END_OF_DAY_OFFSET_MS: i64 = 86_399_999;

/// Inclusive, day-granular date range.
///
/// Days are measured in a fixed UTC offset. `start > end` is allowed and
/// matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

impl ReportingPeriod {
    /// Period measured in UTC days.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            utc_offset_minutes: 0,
        }
    }

    pub fn with_utc_offset_minutes(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = minutes;
        self
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
    }

    /// Epoch milliseconds of midnight at the start of `day`.
    pub fn start_of_day_ms(&self, day: NaiveDate) -> i64 {
        let midnight = day.and_time(NaiveTime::MIN);
        self.offset()
            .from_local_datetime(&midnight)
            .single()
            .map(|dt| dt.timestamp_millis())
            .unwrap_or_else(|| midnight.and_utc().timestamp_millis())
    }

    /// Inclusive millisecond bounds `(start_of_day(start), end_of_day(end))`.
    pub fn bounds_ms(&self) -> (i64, i64) {
        (
            self.start_of_day_ms(self.start),
            self.start_of_day_ms(self.end) + END_OF_DAY_OFFSET_MS,
        )
    }

    pub fn contains_ms(&self, ms: i64) -> bool {
        let (lo, hi) = self.bounds_ms();
        lo <= ms && ms <= hi
    }

    /// Tasks completed inside the period, in input order.
    pub fn filter<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        let (lo, hi) = self.bounds_ms();
        tasks
            .iter()
            .filter(|task| completion_ms(task).is_some_and(|ms| lo <= ms && ms <= hi))
            .collect()
    }
}

/// Completion timestamp of a task.
///
/// Only the first present of `date_closed`, `date_done` is consulted; if it
/// does not parse, the task has no usable completion time.
pub fn completion_ms(task: &Task) -> Option<i64> {
    task.date_closed
        .as_ref()
        .or(task.date_done.as_ref())
        .and_then(|ts| ts.millis())
}

/// Tasks whose completion time falls within `[start, end]` (UTC days).
pub fn filter_by_window(tasks: &[Task], start: NaiveDate, end: NaiveDate) -> Vec<&Task> {
    ReportingPeriod::new(start, end).filter(tasks)
}
