//! Week-level date helpers. Weeks start on Monday.

use chrono::{Datelike, Days, NaiveDate};

/// ## Summary
/// Normalizes an anchor date to the Monday starting its week.
#[must_use]
pub fn week_start(anchor: NaiveDate) -> NaiveDate {
    let days_back = u64::from(anchor.weekday().num_days_from_monday());
    anchor - Days::new(days_back)
}

/// ## Summary
/// The seven consecutive dates of the week containing `anchor`, Monday
/// first.
#[must_use]
pub fn week_dates(anchor: NaiveDate) -> [NaiveDate; 7] {
    let start = week_start(anchor);
    std::array::from_fn(|offset| start + Days::new(offset as u64))
}
