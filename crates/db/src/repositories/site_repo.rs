//! Repository for the `sites` and `user_site_links` tables.

use clockpoint_core::types::DbId;
use sqlx::PgPool;

use crate::models::site::{CreateSite, Site};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, latitude, longitude, radius, active";

/// Provides site lookups and authorization links.
pub struct SiteRepo;

impl SiteRepo {
    /// Insert a new site, returning the created row.
    ///
    /// If `active` is `None` in the input, defaults to `true`.
    pub async fn create(pool: &PgPool, input: &CreateSite) -> Result<Site, sqlx::Error> {
        let query = format!(
            "INSERT INTO sites (name, latitude, longitude, radius, active)
             VALUES ($1, $2, $3, $4, COALESCE($5, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Site>(&query)
            .bind(&input.name)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(input.radius)
            .bind(input.active)
            .fetch_one(pool)
            .await
    }

    /// Active sites the user is authorized for, in authorization order.
    ///
    /// Order is the link row id, then site id. This is the order the
    /// geofence matcher tries candidates in.
    pub async fn list_authorized_active(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Site>, sqlx::Error> {
        sqlx::query_as::<_, Site>(
            "SELECT s.id, s.name, s.latitude, s.longitude, s.radius, s.active
             FROM sites s
             JOIN user_site_links l ON l.site_id = s.id
             WHERE l.user_id = $1 AND s.active = TRUE
             ORDER BY l.id, s.id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Authorize a user for a site. Returns `false` if the link already existed.
    pub async fn authorize_user(
        pool: &PgPool,
        user_id: DbId,
        site_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO user_site_links (user_id, site_id) VALUES ($1, $2)
             ON CONFLICT (user_id, site_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(site_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set the active flag. Returns `true` if the site exists.
    pub async fn set_active(pool: &PgPool, id: DbId, active: bool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE sites SET active = $2 WHERE id = $1")
            .bind(id)
            .bind(active)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
