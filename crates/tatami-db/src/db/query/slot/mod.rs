//! Query composition for `slot`.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::connection::DbConnection;
use crate::db::schema::slot;
use crate::model::slot::{NewSlot, Slot};

pub mod query_builders;
#[cfg(test)]
mod slot_tests;

pub use query_builders::{all, by_created_for_date, by_id, recurring_for_weekday};

/// ## Summary
/// Inserts a slot and returns the stored row.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn insert(conn: &mut DbConnection<'_>, new_slot: &NewSlot) -> QueryResult<Slot> {
    diesel::insert_into(slot::table)
        .values(new_slot)
        .returning(Slot::as_select())
        .get_result(conn)
        .await
}

/// ## Summary
/// Point lookup by slot id.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn find(conn: &mut DbConnection<'_>, id: Uuid) -> QueryResult<Option<Slot>> {
    by_id(id)
        .select(Slot::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Replaces a slot's recurring window and bumps `updated_at`.
///
/// Returns `None` when no row with the id exists.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn update_window(
    conn: &mut DbConnection<'_>,
    id: Uuid,
    start: chrono::NaiveTime,
    end: chrono::NaiveTime,
) -> QueryResult<Option<Slot>> {
    diesel::update(slot::table.filter(slot::id.eq(id)))
        .set((
            slot::start_time.eq(start),
            slot::end_time.eq(end),
            slot::updated_at.eq(diesel::dsl::now),
        ))
        .returning(Slot::as_select())
        .get_result(conn)
        .await
        .optional()
}

/// ## Summary
/// Deletes a slot; the schema cascade removes its exceptions.
///
/// Returns whether a row was removed. A missing id is not an error.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn delete(conn: &mut DbConnection<'_>, id: Uuid) -> QueryResult<bool> {
    let deleted = diesel::delete(slot::table.filter(slot::id.eq(id)))
        .execute(conn)
        .await?;
    Ok(deleted > 0)
}

/// ## Summary
/// Loads recurring slots for one day of the week in stable order.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn list_for_weekday(conn: &mut DbConnection<'_>, day: i16) -> QueryResult<Vec<Slot>> {
    recurring_for_weekday(day)
        .select(Slot::as_select())
        .load(conn)
        .await
}

/// ## Summary
/// Counts slots sharing a literal `created_for_date`.
///
/// Backs the creation capacity rule; resolved occurrences are never
/// consulted.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn count_created_for(
    conn: &mut DbConnection<'_>,
    date: chrono::NaiveDate,
) -> QueryResult<i64> {
    slot::table
        .filter(slot::created_for_date.eq(date))
        .count()
        .get_result(conn)
        .await
}
