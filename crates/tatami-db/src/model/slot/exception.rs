use diesel::{pg::Pg, prelude::*};

use tatami_core::types::TimeWindow;

use crate::db::schema;
use crate::model::slot::Slot;

/// Per-date override of one slot's occurrence.
///
/// A row with null window fields is a suppression marker: the occurrence is
/// removed for that date, not overridden.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable, Associations)]
#[diesel(belongs_to(Slot))]
#[diesel(table_name = schema::slot_exception)]
#[diesel(check_for_backend(Pg))]
pub struct SlotException {
    pub id: uuid::Uuid,
    pub slot_id: uuid::Uuid,
    pub exception_date: chrono::NaiveDate,
    pub start_time: Option<chrono::NaiveTime>,
    pub end_time: Option<chrono::NaiveTime>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl SlotException {
    /// Override window, or `None` when this row is a suppression marker.
    #[must_use]
    pub fn window(&self) -> Option<TimeWindow> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(TimeWindow { start, end }),
            _ => None,
        }
    }

    /// True when this row suppresses the occurrence instead of replacing it.
    #[must_use]
    pub fn is_suppression(&self) -> bool {
        self.window().is_none()
    }
}

/// Insert struct for the `(slot_id, exception_date)` upsert.
///
/// The `id` is only used when the write inserts; on conflict the existing
/// row keeps its id and the window fields are overwritten.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::slot_exception)]
pub struct NewSlotException {
    pub id: uuid::Uuid,
    pub slot_id: uuid::Uuid,
    pub exception_date: chrono::NaiveDate,
    pub start_time: Option<chrono::NaiveTime>,
    pub end_time: Option<chrono::NaiveTime>,
}

impl NewSlotException {
    /// Override row carrying a replacement window.
    #[must_use]
    pub fn override_window(slot_id: uuid::Uuid, date: chrono::NaiveDate, window: TimeWindow) -> Self {
        Self {
            id: uuid::Uuid::now_v7(),
            slot_id,
            exception_date: date,
            start_time: Some(window.start),
            end_time: Some(window.end),
        }
    }

    /// Suppression marker: the occurrence disappears for this date.
    #[must_use]
    pub fn suppression(slot_id: uuid::Uuid, date: chrono::NaiveDate) -> Self {
        Self {
            id: uuid::Uuid::now_v7(),
            slot_id,
            exception_date: date,
            start_time: None,
            end_time: None,
        }
    }
}
