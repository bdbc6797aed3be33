//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod attendance_repo;
pub mod site_repo;

pub use attendance_repo::AttendanceRepo;
pub use site_repo::SiteRepo;
