//! Domain logic for geofence-validated attendance registration.
//!
//! Everything in this crate is pure: no I/O, no database, no clock reads.
//! Callers supply positions, candidate sites and timestamps.

pub mod attendance;
pub mod error;
pub mod geo;
pub mod geofence;
pub mod types;
