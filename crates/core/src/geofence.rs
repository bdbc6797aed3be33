//! First-match geofence selection.
//!
//! Candidates are tried in the order given. The first geofence whose radius
//! covers the reported position wins, even if a later one is closer.

use crate::geo::Coordinates;

/// A circular zone: a center and a radius in meters.
pub trait Geofence {
    fn center(&self) -> Coordinates;
    fn radius_meters(&self) -> f64;
}

/// A geofence that matched, with the distance that was measured.
#[derive(Debug, Clone, Copy)]
pub struct GeofenceMatch<'a, G> {
    pub fence: &'a G,
    pub distance_meters: f64,
}

/// Return the first candidate whose zone contains `position`, or `None`.
///
/// The boundary counts as inside.
pub fn first_match<'a, G: Geofence>(
    position: &Coordinates,
    candidates: &'a [G],
) -> Option<GeofenceMatch<'a, G>> {
    candidates.iter().find_map(|fence| {
        let distance_meters = fence.center().distance_to(position);
        (distance_meters <= fence.radius_meters()).then_some(GeofenceMatch {
            fence,
            distance_meters,
        })
    })
}
