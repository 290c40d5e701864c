//! Query builder functions for slot exceptions.

use diesel::prelude::*;

use crate::db::schema::slot_exception;

/// ## Summary
/// Returns a query to select all exceptions.
#[must_use]
pub fn all() -> slot_exception::BoxedQuery<'static, diesel::pg::Pg> {
    slot_exception::table.into_boxed()
}

/// ## Summary
/// Returns a query for the unique `(slot_id, exception_date)` row.
#[must_use]
pub fn by_slot_and_date(
    slot_id: uuid::Uuid,
    date: chrono::NaiveDate,
) -> slot_exception::BoxedQuery<'static, diesel::pg::Pg> {
    all()
        .filter(slot_exception::slot_id.eq(slot_id))
        .filter(slot_exception::exception_date.eq(date))
}

/// ## Summary
/// Returns a query for every exception on one calendar date.
///
/// This is the single per-date fetch the resolution join relies on; the
/// resolution loop never probes per slot.
#[must_use]
pub fn for_date(date: chrono::NaiveDate) -> slot_exception::BoxedQuery<'static, diesel::pg::Pg> {
    all().filter(slot_exception::exception_date.eq(date))
}
