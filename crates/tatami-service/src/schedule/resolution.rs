//! The recurrence-resolution core: joins base rules with a date's exception
//! map into materialized occurrences.

use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use tatami_core::types::TimeWindow;
use tatami_db::model::slot::Slot;

/// Materialized, calendar-date-specific occurrence of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedOccurrence {
    /// Id of the owning slot.
    pub slot_id: Uuid,
    pub date: NaiveDate,
    pub window: TimeWindow,
    /// True iff an exception row exists for `(slot_id, date)`, whether it
    /// overrides the window or suppresses the occurrence entirely.
    pub is_exception: bool,
}

/// ## Summary
/// Resolves one date from pre-fetched rows.
///
/// `slots` must already be filtered to the date's weekday and
/// `exceptions` is that date's full exception map. Per slot:
/// - no entry: the base window is emitted with `is_exception == false`;
/// - an entry carrying a window: that window replaces the base one,
///   `is_exception == true`;
/// - an entry without a window (suppression marker): nothing is emitted.
///
/// Output order follows `slots`; callers wanting chronological order sort
/// by window start themselves. A slot's `created_for_date` never
/// participates here.
#[must_use]
pub fn resolve_date(
    date: NaiveDate,
    slots: &[Slot],
    exceptions: &HashMap<Uuid, Option<TimeWindow>>,
) -> Vec<ResolvedOccurrence> {
    slots
        .iter()
        .filter_map(|slot| match exceptions.get(&slot.id) {
            None => Some(ResolvedOccurrence {
                slot_id: slot.id,
                date,
                window: slot.window(),
                is_exception: false,
            }),
            Some(Some(window)) => Some(ResolvedOccurrence {
                slot_id: slot.id,
                date,
                window: *window,
                is_exception: true,
            }),
            Some(None) => None,
        })
        .collect()
}
