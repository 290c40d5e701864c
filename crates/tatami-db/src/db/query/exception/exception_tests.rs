//! Unit tests for exception query builders.

use diesel::prelude::*;
use diesel::query_builder::QueryFragment;

use super::*;

/// Helper to check if a query compiles and is valid.
fn query_is_valid<Q>(query: Q) -> bool
where
    Q: QueryFragment<diesel::pg::Pg>,
{
    let _ = diesel::debug_query::<diesel::pg::Pg, _>(&query).to_string();
    true
}

#[test]
fn test_all_exceptions_query_builds() {
    let query = all();
    assert!(query_is_valid(query), "all() query should be valid");
}

#[test]
fn test_by_slot_and_date_filters() {
    let slot_id = uuid::Uuid::new_v4();
    let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 8).expect("valid date");
    let query_str =
        diesel::debug_query::<diesel::pg::Pg, _>(&by_slot_and_date(slot_id, date)).to_string();

    assert!(
        query_str.contains("slot_id"),
        "by_slot_and_date should filter by slot_id"
    );
    assert!(
        query_str.contains("exception_date"),
        "by_slot_and_date should filter by exception_date"
    );
}

#[test]
fn test_for_date_filters_on_date_only() {
    let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 8).expect("valid date");
    let query_str = diesel::debug_query::<diesel::pg::Pg, _>(&for_date(date)).to_string();

    assert!(
        query_str.contains("exception_date"),
        "for_date should filter by exception_date"
    );
    assert!(
        !query_str.contains("slot_id = "),
        "for_date is one fetch for the whole date, never per slot"
    );
}
