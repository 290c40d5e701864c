//! Storage seams for the schedule service.
//!
//! The service depends on these traits rather than on the pool directly, so
//! tests substitute [`MemoryStore`] for Postgres without touching the
//! orchestration code.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use tatami_core::types::TimeWindow;

use crate::error::DbResult;
use crate::model::slot::exception::{NewSlotException, SlotException};
use crate::model::slot::{NewSlot, Slot};

pub mod memory;
pub mod pg;

pub use memory::MemoryStore;
pub use pg::PgStore;

/// Owns the base recurring-rule records.
#[async_trait]
pub trait SlotStore: Send + Sync {
    /// Persists a new slot row. Capacity is the caller's concern.
    async fn insert(&self, new_slot: NewSlot) -> DbResult<Slot>;

    /// Point lookup by id.
    async fn find(&self, id: Uuid) -> DbResult<Option<Slot>>;

    /// Replaces the recurring window; `None` when the id does not exist.
    async fn update_window(&self, id: Uuid, window: TimeWindow) -> DbResult<Option<Slot>>;

    /// Removes a slot together with its exceptions. Missing ids return
    /// `false`, not an error.
    async fn delete(&self, id: Uuid) -> DbResult<bool>;

    /// Recurring slots for one day of the week, in stable retrieval order.
    async fn list_for_weekday(&self, day_of_week: i16) -> DbResult<Vec<Slot>>;

    /// Count of slots sharing a literal `created_for_date`.
    async fn count_for_created_date(&self, date: NaiveDate) -> DbResult<i64>;
}

/// Owns the per-date override records.
#[async_trait]
pub trait ExceptionStore: Send + Sync {
    /// Inserts or overwrites the unique `(slot_id, exception_date)` row.
    async fn upsert(&self, row: NewSlotException) -> DbResult<SlotException>;

    /// Removes the `(slot_id, exception_date)` row.
    async fn delete(&self, slot_id: Uuid, date: NaiveDate) -> DbResult<bool>;

    /// One fetch per date: slot id to override window, with `None` marking
    /// suppression.
    async fn map_for_date(&self, date: NaiveDate) -> DbResult<HashMap<Uuid, Option<TimeWindow>>>;
}
