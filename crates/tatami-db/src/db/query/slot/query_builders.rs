//! Query builder functions for slots.

use diesel::prelude::*;

use crate::db::schema::slot;

/// ## Summary
/// Returns a query to select all slots.
#[must_use]
pub fn all() -> slot::BoxedQuery<'static, diesel::pg::Pg> {
    slot::table.into_boxed()
}

/// ## Summary
/// Returns a query to find a slot by ID.
#[must_use]
pub fn by_id(id: uuid::Uuid) -> slot::BoxedQuery<'static, diesel::pg::Pg> {
    all().filter(slot::id.eq(id))
}

/// ## Summary
/// Returns a query for recurring slots on one day of the week.
///
/// Ordered by creation time then id: the stable retrieval order resolved
/// occurrences inherit.
#[must_use]
pub fn recurring_for_weekday(day: i16) -> slot::BoxedQuery<'static, diesel::pg::Pg> {
    all()
        .filter(slot::is_recurring.eq(true))
        .filter(slot::day_of_week.eq(day))
        .order((slot::created_at.asc(), slot::id.asc()))
}

/// ## Summary
/// Returns a query for slots created for a literal calendar date.
#[must_use]
pub fn by_created_for_date(date: chrono::NaiveDate) -> slot::BoxedQuery<'static, diesel::pg::Pg> {
    all().filter(slot::created_for_date.eq(date))
}
