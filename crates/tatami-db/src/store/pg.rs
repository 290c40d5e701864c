//! Pool-backed store implementation over the diesel query functions.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use tatami_core::types::TimeWindow;

use crate::db::DbProvider;
use crate::db::connection::DbPool;
use crate::db::query::{exception, slot};
use crate::error::DbResult;
use crate::model::slot::exception::{NewSlotException, SlotException};
use crate::model::slot::{NewSlot, Slot};
use crate::store::{ExceptionStore, SlotStore};

/// Postgres store; cheap to clone, shares the underlying pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlotStore for PgStore {
    #[tracing::instrument(skip(self, new_slot), fields(slot_id = %new_slot.id))]
    async fn insert(&self, new_slot: NewSlot) -> DbResult<Slot> {
        let mut conn = self.pool.get_connection().await?;
        Ok(slot::insert(&mut conn, &new_slot).await?)
    }

    async fn find(&self, id: Uuid) -> DbResult<Option<Slot>> {
        let mut conn = self.pool.get_connection().await?;
        Ok(slot::find(&mut conn, id).await?)
    }

    #[tracing::instrument(skip(self))]
    async fn update_window(&self, id: Uuid, window: TimeWindow) -> DbResult<Option<Slot>> {
        let mut conn = self.pool.get_connection().await?;
        Ok(slot::update_window(&mut conn, id, window.start, window.end).await?)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> DbResult<bool> {
        let mut conn = self.pool.get_connection().await?;
        Ok(slot::delete(&mut conn, id).await?)
    }

    async fn list_for_weekday(&self, day_of_week: i16) -> DbResult<Vec<Slot>> {
        let mut conn = self.pool.get_connection().await?;
        Ok(slot::list_for_weekday(&mut conn, day_of_week).await?)
    }

    async fn count_for_created_date(&self, date: NaiveDate) -> DbResult<i64> {
        let mut conn = self.pool.get_connection().await?;
        Ok(slot::count_created_for(&mut conn, date).await?)
    }
}

#[async_trait]
impl ExceptionStore for PgStore {
    #[tracing::instrument(skip(self, row), fields(slot_id = %row.slot_id, date = %row.exception_date))]
    async fn upsert(&self, row: NewSlotException) -> DbResult<SlotException> {
        let mut conn = self.pool.get_connection().await?;
        Ok(exception::upsert(&mut conn, &row).await?)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, slot_id: Uuid, date: NaiveDate) -> DbResult<bool> {
        let mut conn = self.pool.get_connection().await?;
        Ok(exception::delete(&mut conn, slot_id, date).await?)
    }

    async fn map_for_date(&self, date: NaiveDate) -> DbResult<HashMap<Uuid, Option<TimeWindow>>> {
        let mut conn = self.pool.get_connection().await?;
        let rows = exception::list_for_date(&mut conn, date).await?;
        Ok(rows.into_iter().map(|row| (row.slot_id, row.window())).collect())
    }
}
