use diesel::{pg::Pg, prelude::*};

use tatami_core::types::TimeWindow;

use crate::db::schema;

pub mod exception;

/// Weekly recurring availability rule for one day of the week.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::slot)]
#[diesel(check_for_backend(Pg))]
pub struct Slot {
    pub id: uuid::Uuid,
    pub day_of_week: i16,
    pub start_time: chrono::NaiveTime,
    pub end_time: chrono::NaiveTime,
    pub created_for_date: chrono::NaiveDate,
    pub is_recurring: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Slot {
    /// Base recurring window for this rule.
    #[must_use]
    pub fn window(&self) -> TimeWindow {
        TimeWindow {
            start: self.start_time,
            end: self.end_time,
        }
    }
}

/// Insert struct for creating new slots
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::slot)]
pub struct NewSlot {
    pub id: uuid::Uuid,
    pub day_of_week: i16,
    pub start_time: chrono::NaiveTime,
    pub end_time: chrono::NaiveTime,
    pub created_for_date: chrono::NaiveDate,
    pub is_recurring: bool,
}
