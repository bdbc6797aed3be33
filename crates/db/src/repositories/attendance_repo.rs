//! Repository for the `attendance_records` table.

use clockpoint_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::attendance::{AttendanceRecord, CreateAttendanceRecord};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, site_id, clock_in, clock_out, lat, lon";

/// Provides clock-in/clock-out operations on attendance records.
pub struct AttendanceRepo;

impl AttendanceRepo {
    /// Insert a new open record, returning the created row.
    ///
    /// Does not look at existing open records.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAttendanceRecord,
    ) -> Result<AttendanceRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO attendance_records (user_id, site_id, clock_in, lat, lon)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AttendanceRecord>(&query)
            .bind(input.user_id)
            .bind(input.site_id)
            .bind(input.clock_in)
            .bind(input.lat)
            .bind(input.lon)
            .fetch_one(pool)
            .await
    }

    /// Insert a new open record only if the user has none open.
    ///
    /// Returns `None` when an open record already exists. A transaction-scoped
    /// advisory lock on the user id serializes concurrent callers, so two
    /// racing clock-ins cannot both succeed.
    pub async fn create_if_closed(
        pool: &PgPool,
        input: &CreateAttendanceRecord,
    ) -> Result<Option<AttendanceRecord>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(input.user_id)
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO attendance_records (user_id, site_id, clock_in, lat, lon)
             SELECT $1, $2, $3, $4, $5
             WHERE NOT EXISTS (
                 SELECT 1 FROM attendance_records WHERE user_id = $1 AND clock_out IS NULL
             )
             RETURNING {COLUMNS}"
        );
        let record = sqlx::query_as::<_, AttendanceRecord>(&query)
            .bind(input.user_id)
            .bind(input.site_id)
            .bind(input.clock_in)
            .bind(input.lat)
            .bind(input.lon)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(record)
    }

    /// Open records for a user, oldest first.
    pub async fn list_open(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attendance_records
             WHERE user_id = $1 AND clock_out IS NULL
             ORDER BY clock_in, id"
        );
        sqlx::query_as::<_, AttendanceRecord>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// All records for a user, oldest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attendance_records WHERE user_id = $1 ORDER BY clock_in, id"
        );
        sqlx::query_as::<_, AttendanceRecord>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Set `clock_out` on every open record of the user.
    ///
    /// Returns the number of records closed; zero is not an error.
    pub async fn close_open(
        pool: &PgPool,
        user_id: DbId,
        clock_out: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE attendance_records SET clock_out = $2
             WHERE user_id = $1 AND clock_out IS NULL",
        )
        .bind(user_id)
        .bind(clock_out)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
