//! Site entity model and DTOs.

use clockpoint_core::geo::Coordinates;
use clockpoint_core::geofence::Geofence;
use clockpoint_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A site row from the `sites` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Site {
    pub id: DbId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Authorized radius in meters. Always positive.
    pub radius: f64,
    pub active: bool,
}

impl Geofence for Site {
    fn center(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    fn radius_meters(&self) -> f64 {
        self.radius
    }
}

/// DTO for creating a new site.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSite {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius: f64,
    /// Defaults to `true` if omitted.
    pub active: Option<bool>,
}
