use async_trait::async_trait;
use clockpoint_core::types::{DbId, Timestamp};

use super::AttendanceStore;
use crate::error::StoreError;
use crate::models::attendance::{AttendanceRecord, CreateAttendanceRecord};
use crate::models::site::Site;
use crate::repositories::{AttendanceRepo, SiteRepo};
use crate::DbPool;

/// [`AttendanceStore`] over a PostgreSQL pool.
#[derive(Clone)]
pub struct PgAttendanceStore {
    pool: DbPool,
}

impl PgAttendanceStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceStore for PgAttendanceStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn authorized_sites(&self, user_id: DbId) -> Result<Vec<Site>, StoreError> {
        Ok(SiteRepo::list_authorized_active(&self.pool, user_id).await?)
    }

    async fn open_sessions(&self, user_id: DbId) -> Result<Vec<AttendanceRecord>, StoreError> {
        Ok(AttendanceRepo::list_open(&self.pool, user_id).await?)
    }

    async fn clock_in(
        &self,
        input: &CreateAttendanceRecord,
    ) -> Result<AttendanceRecord, StoreError> {
        Ok(AttendanceRepo::create(&self.pool, input).await?)
    }

    async fn clock_in_if_closed(
        &self,
        input: &CreateAttendanceRecord,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        let record = AttendanceRepo::create_if_closed(&self.pool, input).await?;
        if record.is_none() {
            tracing::debug!(user_id = input.user_id, "Guarded clock-in found an open record");
        }
        Ok(record)
    }

    async fn clock_out(&self, user_id: DbId, at: Timestamp) -> Result<u64, StoreError> {
        let closed = AttendanceRepo::close_open(&self.pool, user_id, at).await?;
        tracing::debug!(user_id, closed, "Closed open attendance records");
        Ok(closed)
    }
}
