//! Schedule orchestration: validates writes against the model invariants
//! and serves the materialized per-date views.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use tatami_core::constants::SLOTS_PER_CREATED_DATE;
use tatami_core::error::CoreError;
use tatami_core::types::{self, TimeWindow};
use tatami_db::model::slot::exception::{NewSlotException, SlotException};
use tatami_db::model::slot::{NewSlot, Slot};
use tatami_db::store::{ExceptionStore, SlotStore};

use crate::error::{ServiceError, ServiceResult};
use crate::schedule::resolution::{ResolvedOccurrence, resolve_date};
use crate::schedule::week::week_dates;

/// Parameters for creating a base recurring rule.
#[derive(Debug, Clone, Copy)]
pub struct CreateSlot {
    pub day_of_week: i16,
    pub window: TimeWindow,
    pub created_for_date: NaiveDate,
}

/// Partial window edit for an existing rule; `None` fields keep the stored
/// value.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowPatch {
    pub start: Option<chrono::NaiveTime>,
    pub end: Option<chrono::NaiveTime>,
}

/// One day of a week-level view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub day_of_week: i16,
    pub occurrences: Vec<ResolvedOccurrence>,
}

/// Orchestrates slot and exception writes and the resolved read views.
///
/// Stores are injected so tests can run against
/// [`tatami_db::store::MemoryStore`].
pub struct ScheduleService {
    slots: Arc<dyn SlotStore>,
    exceptions: Arc<dyn ExceptionStore>,
}

impl ScheduleService {
    #[must_use]
    pub fn new(slots: Arc<dyn SlotStore>, exceptions: Arc<dyn ExceptionStore>) -> Self {
        Self { slots, exceptions }
    }

    /// ## Summary
    /// Creates a base recurring rule.
    ///
    /// The ≤2-per-`created_for_date` cap counts literal `created_for_date`
    /// values only; the resolved view for that date is never consulted and
    /// exceptions never free capacity.
    ///
    /// ## Errors
    /// `ValidationError` for an out-of-range day, `CapacityExceeded` when
    /// the date already carries two rules.
    #[tracing::instrument(skip(self, request), fields(
        day_of_week = request.day_of_week,
        created_for_date = %request.created_for_date
    ))]
    pub async fn create_slot(&self, request: CreateSlot) -> ServiceResult<Slot> {
        types::validate_day_number(request.day_of_week)?;

        let existing = self
            .slots
            .count_for_created_date(request.created_for_date)
            .await?;
        if existing >= SLOTS_PER_CREATED_DATE {
            return Err(CoreError::CapacityExceeded(format!(
                "{existing} slots already exist for {}",
                request.created_for_date
            ))
            .into());
        }

        let new_slot = NewSlot {
            id: Uuid::now_v7(),
            day_of_week: request.day_of_week,
            start_time: request.window.start,
            end_time: request.window.end,
            created_for_date: request.created_for_date,
            is_recurring: true,
        };

        tracing::debug!(slot_id = %new_slot.id, "Creating slot");
        Ok(self.slots.insert(new_slot).await?)
    }

    /// ## Summary
    /// Looks up one base rule.
    ///
    /// ## Errors
    /// `NotFound` when no slot has the id.
    pub async fn slot(&self, id: Uuid) -> ServiceResult<Slot> {
        self.slots
            .find(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("slot {id}")))
    }

    /// ## Summary
    /// Resolves the occurrences for one calendar date.
    ///
    /// Two store reads regardless of slot count: the weekday's slot list
    /// and the date's exception map.
    ///
    /// ## Errors
    /// Propagates storage failures.
    #[tracing::instrument(skip(self))]
    pub async fn slots_for_date(&self, date: NaiveDate) -> ServiceResult<Vec<ResolvedOccurrence>> {
        let slots = self.slots.list_for_weekday(types::day_number(date)).await?;
        let exceptions = self.exceptions.map_for_date(date).await?;
        Ok(resolve_date(date, &slots, &exceptions))
    }

    /// ## Summary
    /// Resolves the week containing `anchor`: exactly seven entries,
    /// Monday first.
    ///
    /// Each date resolves independently; a range query is not one
    /// consistent snapshot.
    ///
    /// ## Errors
    /// Propagates storage failures.
    #[tracing::instrument(skip(self))]
    pub async fn slots_for_week(&self, anchor: NaiveDate) -> ServiceResult<Vec<DaySchedule>> {
        let mut days = Vec::with_capacity(7);
        for date in week_dates(anchor) {
            let occurrences = self.slots_for_date(date).await?;
            days.push(DaySchedule {
                date,
                day_of_week: types::day_number(date),
                occurrences,
            });
        }
        Ok(days)
    }

    /// ## Summary
    /// Edits the recurring rule itself: every occurrence without an
    /// exception follows the new window; existing exceptions keep
    /// overriding.
    ///
    /// ## Errors
    /// `NotFound` for a missing id, `InvalidWindow` when the merged window
    /// is not ordered.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_slot(&self, id: Uuid, patch: WindowPatch) -> ServiceResult<Slot> {
        let current = self.slot(id).await?;
        let window = TimeWindow::new(
            patch.start.unwrap_or(current.start_time),
            patch.end.unwrap_or(current.end_time),
        )?;

        self.slots
            .update_window(id, window)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("slot {id}")))
    }

    /// ## Summary
    /// Deletes the recurring rule; all of its occurrences and exceptions
    /// vanish.
    ///
    /// Returns whether a rule existed — deleting a missing id is a no-op,
    /// not an error.
    ///
    /// ## Errors
    /// Propagates storage failures.
    #[tracing::instrument(skip(self))]
    pub async fn delete_slot(&self, id: Uuid) -> ServiceResult<bool> {
        Ok(self.slots.delete(id).await?)
    }

    /// ## Summary
    /// Edits one occurrence only, leaving the recurring rule untouched.
    ///
    /// Upserts the `(slot_id, date)` exception row; repeating the call with
    /// the same arguments still leaves exactly one row.
    ///
    /// ## Errors
    /// `NotFound` when the slot does not exist.
    #[tracing::instrument(skip(self, window))]
    pub async fn update_slot_for_date(
        &self,
        id: Uuid,
        date: NaiveDate,
        window: TimeWindow,
    ) -> ServiceResult<SlotException> {
        self.slot(id).await?;

        Ok(self
            .exceptions
            .upsert(NewSlotException::override_window(id, date, window))
            .await?)
    }

    /// ## Summary
    /// Suppresses one occurrence: writes a null-window tombstone for
    /// `(slot_id, date)` so the recurrence stays hidden on that date. The
    /// row persists; this is a write, not a deletion.
    ///
    /// ## Errors
    /// `NotFound` when the slot does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn delete_slot_for_date(
        &self,
        id: Uuid,
        date: NaiveDate,
    ) -> ServiceResult<SlotException> {
        self.slot(id).await?;

        Ok(self
            .exceptions
            .upsert(NewSlotException::suppression(id, date))
            .await?)
    }
}
