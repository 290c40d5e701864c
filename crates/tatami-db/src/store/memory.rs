//! In-memory store: the storage test double.
//!
//! Mirrors the Postgres store's observable behavior, including the delete
//! cascade and the `(slot_id, exception_date)` upsert, over mutex-guarded
//! vectors that preserve insertion order.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use tatami_core::types::TimeWindow;

use crate::error::DbResult;
use crate::model::slot::exception::{NewSlotException, SlotException};
use crate::model::slot::{NewSlot, Slot};
use crate::store::{ExceptionStore, SlotStore};

#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<Vec<Slot>>,
    exceptions: Mutex<Vec<SlotException>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> std::sync::MutexGuard<'_, Vec<Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn exceptions(&self) -> std::sync::MutexGuard<'_, Vec<SlotException>> {
        self.exceptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl SlotStore for MemoryStore {
    async fn insert(&self, new_slot: NewSlot) -> DbResult<Slot> {
        let now = Utc::now();
        let slot = Slot {
            id: new_slot.id,
            day_of_week: new_slot.day_of_week,
            start_time: new_slot.start_time,
            end_time: new_slot.end_time,
            created_for_date: new_slot.created_for_date,
            is_recurring: new_slot.is_recurring,
            created_at: now,
            updated_at: now,
        };
        self.slots().push(slot.clone());
        Ok(slot)
    }

    async fn find(&self, id: Uuid) -> DbResult<Option<Slot>> {
        Ok(self.slots().iter().find(|slot| slot.id == id).cloned())
    }

    async fn update_window(&self, id: Uuid, window: TimeWindow) -> DbResult<Option<Slot>> {
        let mut slots = self.slots();
        let Some(slot) = slots.iter_mut().find(|slot| slot.id == id) else {
            return Ok(None);
        };
        slot.start_time = window.start;
        slot.end_time = window.end;
        slot.updated_at = Utc::now();
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: Uuid) -> DbResult<bool> {
        let mut slots = self.slots();
        let before = slots.len();
        slots.retain(|slot| slot.id != id);
        let removed = slots.len() < before;
        if removed {
            // FK cascade
            self.exceptions().retain(|row| row.slot_id != id);
        }
        Ok(removed)
    }

    async fn list_for_weekday(&self, day_of_week: i16) -> DbResult<Vec<Slot>> {
        Ok(self
            .slots()
            .iter()
            .filter(|slot| slot.is_recurring && slot.day_of_week == day_of_week)
            .cloned()
            .collect())
    }

    async fn count_for_created_date(&self, date: NaiveDate) -> DbResult<i64> {
        Ok(self
            .slots()
            .iter()
            .filter(|slot| slot.created_for_date == date)
            .count() as i64)
    }
}

#[async_trait]
impl ExceptionStore for MemoryStore {
    async fn upsert(&self, row: NewSlotException) -> DbResult<SlotException> {
        let mut exceptions = self.exceptions();
        let now = Utc::now();

        if let Some(existing) = exceptions
            .iter_mut()
            .find(|ex| ex.slot_id == row.slot_id && ex.exception_date == row.exception_date)
        {
            existing.start_time = row.start_time;
            existing.end_time = row.end_time;
            existing.updated_at = now;
            return Ok(existing.clone());
        }

        let stored = SlotException {
            id: row.id,
            slot_id: row.slot_id,
            exception_date: row.exception_date,
            start_time: row.start_time,
            end_time: row.end_time,
            created_at: now,
            updated_at: now,
        };
        exceptions.push(stored.clone());
        Ok(stored)
    }

    async fn delete(&self, slot_id: Uuid, date: NaiveDate) -> DbResult<bool> {
        let mut exceptions = self.exceptions();
        let before = exceptions.len();
        exceptions.retain(|row| !(row.slot_id == slot_id && row.exception_date == date));
        Ok(exceptions.len() < before)
    }

    async fn map_for_date(&self, date: NaiveDate) -> DbResult<HashMap<Uuid, Option<TimeWindow>>> {
        Ok(self
            .exceptions()
            .iter()
            .filter(|row| row.exception_date == date)
            .map(|row| (row.slot_id, row.window()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;

    fn window(start: (u32, u32), end: (u32, u32)) -> TimeWindow {
        TimeWindow {
            start: NaiveTime::from_hms_opt(start.0, start.1, 0).expect("valid time"),
            end: NaiveTime::from_hms_opt(end.0, end.1, 0).expect("valid time"),
        }
    }

    fn new_slot(day_of_week: i16) -> NewSlot {
        let w = window((9, 0), (10, 0));
        NewSlot {
            id: Uuid::now_v7(),
            day_of_week,
            start_time: w.start,
            end_time: w.end,
            created_for_date: NaiveDate::from_ymd_opt(2024, 1, 8).expect("valid date"),
            is_recurring: true,
        }
    }

    #[tokio::test]
    async fn delete_cascades_to_exceptions() {
        let store = MemoryStore::new();
        let slot = store.insert(new_slot(1)).await.expect("insert");
        let date = NaiveDate::from_ymd_opt(2024, 1, 8).expect("valid date");

        ExceptionStore::upsert(&store, NewSlotException::suppression(slot.id, date))
            .await
            .expect("upsert");
        assert_eq!(store.map_for_date(date).await.expect("map").len(), 1);

        assert!(SlotStore::delete(&store, slot.id).await.expect("delete"));
        assert!(store.map_for_date(date).await.expect("map").is_empty());
    }

    #[tokio::test]
    async fn upsert_overwrites_instead_of_duplicating() {
        let store = MemoryStore::new();
        let slot = store.insert(new_slot(1)).await.expect("insert");
        let date = NaiveDate::from_ymd_opt(2024, 1, 8).expect("valid date");

        let first = ExceptionStore::upsert(
            &store,
            NewSlotException::override_window(slot.id, date, window((14, 0), (15, 0))),
        )
        .await
        .expect("first upsert");

        let second = ExceptionStore::upsert(
            &store,
            NewSlotException::override_window(slot.id, date, window((16, 0), (17, 0))),
        )
        .await
        .expect("second upsert");

        // The existing row keeps its id; only the window moves.
        assert_eq!(first.id, second.id);
        let map = store.map_for_date(date).await.expect("map");
        assert_eq!(map.len(), 1);
        assert_eq!(map[&slot.id], Some(window((16, 0), (17, 0))));
    }

    #[tokio::test]
    async fn list_for_weekday_preserves_insertion_order() {
        let store = MemoryStore::new();
        let first = store.insert(new_slot(3)).await.expect("insert");
        let second = store.insert(new_slot(3)).await.expect("insert");
        store.insert(new_slot(4)).await.expect("insert");

        let listed = store.list_for_weekday(3).await.expect("list");
        let ids: Vec<Uuid> = listed.iter().map(|slot| slot.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }
}
