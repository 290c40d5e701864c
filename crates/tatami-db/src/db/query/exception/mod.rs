//! Query composition for `slot_exception`.

use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::connection::DbConnection;
use crate::db::schema::slot_exception;
use crate::model::slot::exception::{NewSlotException, SlotException};

pub mod query_builders;
#[cfg(test)]
mod exception_tests;

pub use query_builders::{all, by_slot_and_date, for_date};

/// ## Summary
/// Inserts the exception row, or overwrites the window fields of the
/// existing `(slot_id, exception_date)` row.
///
/// A single round trip on the uniqueness key; the two-step
/// check-then-write this replaces could observe the row appearing between
/// the steps.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn upsert(
    conn: &mut DbConnection<'_>,
    row: &NewSlotException,
) -> QueryResult<SlotException> {
    diesel::insert_into(slot_exception::table)
        .values(row)
        .on_conflict((slot_exception::slot_id, slot_exception::exception_date))
        .do_update()
        .set((
            slot_exception::start_time.eq(excluded(slot_exception::start_time)),
            slot_exception::end_time.eq(excluded(slot_exception::end_time)),
            slot_exception::updated_at.eq(diesel::dsl::now),
        ))
        .returning(SlotException::as_select())
        .get_result(conn)
        .await
}

/// ## Summary
/// Deletes the `(slot_id, exception_date)` row.
///
/// Returns whether a row was removed. A missing pair is not an error.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn delete(
    conn: &mut DbConnection<'_>,
    slot_id: Uuid,
    date: chrono::NaiveDate,
) -> QueryResult<bool> {
    let deleted = diesel::delete(
        slot_exception::table
            .filter(slot_exception::slot_id.eq(slot_id))
            .filter(slot_exception::exception_date.eq(date)),
    )
    .execute(conn)
    .await?;
    Ok(deleted > 0)
}

/// ## Summary
/// Loads every exception for one calendar date.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn list_for_date(
    conn: &mut DbConnection<'_>,
    date: chrono::NaiveDate,
) -> QueryResult<Vec<SlotException>> {
    for_date(date)
        .select(SlotException::as_select())
        .load(conn)
        .await
}
