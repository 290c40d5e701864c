//! Unit tests for slot query builders.

use diesel::prelude::*;
use diesel::query_builder::QueryFragment;

use super::*;

/// Helper to check if a query compiles and is valid.
fn query_is_valid<Q>(query: Q) -> bool
where
    Q: QueryFragment<diesel::pg::Pg>,
{
    // If the query compiles and can be converted to SQL, it's valid
    let _ = diesel::debug_query::<diesel::pg::Pg, _>(&query).to_string();
    true
}

#[test]
fn test_all_slots_query_builds() {
    let query = all();
    assert!(query_is_valid(query), "all() query should be valid");
}

#[test]
fn test_by_id_query_builds() {
    let id = uuid::Uuid::new_v4();
    let query = by_id(id);
    assert!(query_is_valid(query), "by_id() query should be valid");
}

#[test]
fn test_by_id_filters_on_id() {
    let id = uuid::Uuid::new_v4();
    let query_str = diesel::debug_query::<diesel::pg::Pg, _>(&by_id(id)).to_string();

    assert!(query_str.contains("\"id\""), "by_id should filter by id");
}

#[test]
fn test_recurring_for_weekday_filters() {
    let query_str =
        diesel::debug_query::<diesel::pg::Pg, _>(&recurring_for_weekday(1)).to_string();

    assert!(
        query_str.contains("is_recurring"),
        "recurring_for_weekday should filter by is_recurring"
    );
    assert!(
        query_str.contains("day_of_week"),
        "recurring_for_weekday should filter by day_of_week"
    );
    assert!(
        query_str.contains("ORDER BY"),
        "recurring_for_weekday should carry a stable ordering"
    );
}

#[test]
fn test_by_created_for_date_filters() {
    let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 8).expect("valid date");
    let query_str =
        diesel::debug_query::<diesel::pg::Pg, _>(&by_created_for_date(date)).to_string();

    assert!(
        query_str.contains("created_for_date"),
        "by_created_for_date should filter by created_for_date"
    );
    assert!(
        !query_str.contains("day_of_week"),
        "the capacity query must not look at the weekday"
    );
}

#[test]
fn test_different_weekdays_produce_different_queries() {
    let monday = diesel::debug_query::<diesel::pg::Pg, _>(&recurring_for_weekday(1)).to_string();
    let tuesday = diesel::debug_query::<diesel::pg::Pg, _>(&recurring_for_weekday(2)).to_string();

    assert_ne!(
        monday, tuesday,
        "Different weekdays should produce different query parameters"
    );
}
