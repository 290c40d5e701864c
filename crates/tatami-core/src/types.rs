use chrono::{Datelike, NaiveDate, NaiveTime};

use crate::error::{CoreError, CoreResult};

/// Half-open `[start, end)` wall-clock interval within a single day.
///
/// All times are naive local values; the scheduler has no timezone concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    /// ## Summary
    /// Builds a window from two wall-clock times.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidWindow` when `start >= end`, including the
    /// zero-length `start == end` boundary.
    pub fn new(start: NaiveTime, end: NaiveTime) -> CoreResult<Self> {
        if start >= end {
            return Err(CoreError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// Day-of-week number for a calendar date, 0 = Sunday through 6 = Saturday.
#[must_use]
pub fn day_number(date: NaiveDate) -> i16 {
    date.weekday().num_days_from_sunday() as i16
}

/// ## Summary
/// Validates a day-of-week number, 0 = Sunday through 6 = Saturday.
///
/// ## Errors
/// Returns `CoreError::ValidationError` for values outside `0..=6`.
pub fn validate_day_number(day: i16) -> CoreResult<()> {
    if (0..=6).contains(&day) {
        Ok(())
    } else {
        Err(CoreError::ValidationError(format!(
            "day_of_week must be between 0 and 6, got {day}"
        )))
    }
}

/// ## Summary
/// Parses a wall-clock time from `HH:MM` or `HH:MM:SS` text.
///
/// ## Errors
/// Returns `CoreError::ParseError` when the text matches neither format.
pub fn parse_wall_time(text: &str) -> CoreResult<NaiveTime> {
    NaiveTime::parse_from_str(text, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
        .map_err(|err| CoreError::ParseError(format!("invalid time {text:?}: {err}")))
}

/// Formats a wall-clock time as `HH:MM`.
#[must_use]
pub fn format_wall_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}
