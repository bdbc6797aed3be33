use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use clockpoint_core::types::{DbId, Timestamp};
use tokio::sync::RwLock;

use super::AttendanceStore;
use crate::error::StoreError;
use crate::models::attendance::{AttendanceRecord, CreateAttendanceRecord};
use crate::models::site::{CreateSite, Site};

#[derive(Default)]
struct Tables {
    sites: Vec<Site>,
    /// `(user_id, site_id)` in insertion order.
    links: Vec<(DbId, DbId)>,
    records: Vec<AttendanceRecord>,
}

/// In-process [`AttendanceStore`].
///
/// Mirrors the PostgreSQL semantics: ids start at 1, authorization order is
/// insertion order, only active sites are returned, site radius must be
/// positive. [`set_unavailable`]
/// makes every trait method fail, to exercise error paths.
///
/// [`set_unavailable`]: MemoryAttendanceStore::set_unavailable
#[derive(Default)]
pub struct MemoryAttendanceStore {
    tables: RwLock<Tables>,
    unavailable: AtomicBool,
}

impl MemoryAttendanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a site, returning it with its assigned id.
    ///
    /// Fails with [`StoreError::Constraint`] when the radius is not positive.
    pub async fn create_site(&self, input: &CreateSite) -> Result<Site, StoreError> {
        if input.radius.is_nan() || input.radius <= 0.0 {
            return Err(StoreError::Constraint(format!(
                "ck_sites_radius_positive: radius {} must be > 0",
                input.radius
            )));
        }
        let mut tables = self.tables.write().await;
        let site = Site {
            id: tables.sites.len() as DbId + 1,
            name: input.name.clone(),
            latitude: input.latitude,
            longitude: input.longitude,
            radius: input.radius,
            active: input.active.unwrap_or(true),
        };
        tables.sites.push(site.clone());
        Ok(site)
    }

    /// Authorize a user for a site. Returns `false` if the link already existed.
    pub async fn authorize_user(&self, user_id: DbId, site_id: DbId) -> bool {
        let mut tables = self.tables.write().await;
        if tables.links.contains(&(user_id, site_id)) {
            return false;
        }
        tables.links.push((user_id, site_id));
        true
    }

    /// Set a site's active flag. Returns `true` if the site exists.
    pub async fn set_site_active(&self, site_id: DbId, active: bool) -> bool {
        let mut tables = self.tables.write().await;
        match tables.sites.iter_mut().find(|s| s.id == site_id) {
            Some(site) => {
                site.active = active;
                true
            }
            None => false,
        }
    }

    /// All records for a user, in insertion order.
    pub async fn records_for_user(&self, user_id: DbId) -> Vec<AttendanceRecord> {
        let tables = self.tables.read().await;
        tables
            .records
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("in-memory store switched off".into()))
        } else {
            Ok(())
        }
    }
}

impl Tables {
    fn insert_record(&mut self, input: &CreateAttendanceRecord) -> AttendanceRecord {
        let record = AttendanceRecord {
            id: self.records.len() as DbId + 1,
            user_id: input.user_id,
            site_id: input.site_id,
            clock_in: input.clock_in,
            clock_out: None,
            lat: input.lat,
            lon: input.lon,
        };
        self.records.push(record.clone());
        record
    }

    fn has_open(&self, user_id: DbId) -> bool {
        self.records
            .iter()
            .any(|r| r.user_id == user_id && r.is_open())
    }
}

#[async_trait]
impl AttendanceStore for MemoryAttendanceStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        self.check_available()
    }

    async fn authorized_sites(&self, user_id: DbId) -> Result<Vec<Site>, StoreError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        let sites = tables
            .links
            .iter()
            .filter(|(uid, _)| *uid == user_id)
            .filter_map(|(_, site_id)| tables.sites.iter().find(|s| s.id == *site_id))
            .filter(|s| s.active)
            .cloned()
            .collect();
        Ok(sites)
    }

    async fn open_sessions(&self, user_id: DbId) -> Result<Vec<AttendanceRecord>, StoreError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .records
            .iter()
            .filter(|r| r.user_id == user_id && r.is_open())
            .cloned()
            .collect())
    }

    async fn clock_in(
        &self,
        input: &CreateAttendanceRecord,
    ) -> Result<AttendanceRecord, StoreError> {
        self.check_available()?;
        Ok(self.tables.write().await.insert_record(input))
    }

    async fn clock_in_if_closed(
        &self,
        input: &CreateAttendanceRecord,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if tables.has_open(input.user_id) {
            return Ok(None);
        }
        Ok(Some(tables.insert_record(input)))
    }

    async fn clock_out(&self, user_id: DbId, at: Timestamp) -> Result<u64, StoreError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let mut closed = 0;
        for record in tables
            .records
            .iter_mut()
            .filter(|r| r.user_id == user_id && r.is_open())
        {
            record.clock_out = Some(at);
            closed += 1;
        }
        Ok(closed)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;

    fn site(name: &str, active: bool) -> CreateSite {
        CreateSite {
            name: name.to_string(),
            latitude: 10.0,
            longitude: 10.0,
            radius: 100.0,
            active: Some(active),
        }
    }

    fn entry(user_id: DbId, site_id: DbId) -> CreateAttendanceRecord {
        CreateAttendanceRecord {
            user_id,
            site_id,
            clock_in: Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap(),
            lat: 10.0005,
            lon: 10.0005,
        }
    }

    #[tokio::test]
    async fn authorized_sites_follow_link_order_and_skip_inactive() {
        let store = MemoryAttendanceStore::new();
        let a = store.create_site(&site("A", true)).await.unwrap();
        let b = store.create_site(&site("B", true)).await.unwrap();
        let c = store.create_site(&site("C", false)).await.unwrap();

        store.authorize_user(7, b.id).await;
        store.authorize_user(7, c.id).await;
        store.authorize_user(7, a.id).await;
        store.authorize_user(8, a.id).await;

        let names: Vec<_> = store
            .authorized_sites(7)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, ["B", "A"]);
    }

    #[tokio::test]
    async fn duplicate_authorization_is_ignored() {
        let store = MemoryAttendanceStore::new();
        let a = store.create_site(&site("A", true)).await.unwrap();
        assert!(store.authorize_user(1, a.id).await);
        assert!(!store.authorize_user(1, a.id).await);
        assert_eq!(store.authorized_sites(1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn deactivated_site_disappears_from_lookup() {
        let store = MemoryAttendanceStore::new();
        let a = store.create_site(&site("A", true)).await.unwrap();
        store.authorize_user(1, a.id).await;
        assert!(store.set_site_active(a.id, false).await);
        assert!(store.authorized_sites(1).await.unwrap().is_empty());
        assert!(!store.set_site_active(99, false).await);
    }

    #[tokio::test]
    async fn clock_out_closes_every_open_record() {
        let store = MemoryAttendanceStore::new();
        store.clock_in(&entry(1, 1)).await.unwrap();
        store.clock_in(&entry(1, 1)).await.unwrap();
        store.clock_in(&entry(2, 1)).await.unwrap();

        let at = Utc.with_ymd_and_hms(2026, 3, 2, 17, 0, 0).unwrap();
        assert_eq!(store.clock_out(1, at).await.unwrap(), 2);
        assert!(store.open_sessions(1).await.unwrap().is_empty());
        assert_eq!(store.open_sessions(2).await.unwrap().len(), 1);

        // Nothing left to close.
        assert_eq!(store.clock_out(1, at).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn guarded_clock_in_refuses_second_open_record() {
        let store = MemoryAttendanceStore::new();
        assert!(store.clock_in_if_closed(&entry(1, 1)).await.unwrap().is_some());
        assert!(store.clock_in_if_closed(&entry(1, 1)).await.unwrap().is_none());
        assert_eq!(store.records_for_user(1).await.len(), 1);
    }

    #[tokio::test]
    async fn non_positive_radius_is_rejected() {
        let store = MemoryAttendanceStore::new();
        for radius in [0.0, -5.0, f64::NAN] {
            let mut input = site("Bad", true);
            input.radius = radius;
            assert_matches!(store.create_site(&input).await, Err(StoreError::Constraint(_)));
        }
        // Nothing was inserted, so the next site still gets id 1.
        assert_eq!(store.create_site(&site("Good", true)).await.unwrap().id, 1);
    }

    #[tokio::test]
    async fn unavailable_store_fails_every_operation() {
        let store = MemoryAttendanceStore::new();
        store.set_unavailable(true);
        assert_matches!(store.health_check().await, Err(StoreError::Unavailable(_)));
        assert_matches!(store.authorized_sites(1).await, Err(StoreError::Unavailable(_)));
        assert_matches!(store.clock_in(&entry(1, 1)).await, Err(StoreError::Unavailable(_)));

        store.set_unavailable(false);
        assert!(store.health_check().await.is_ok());
    }
}
