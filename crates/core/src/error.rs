#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The reported position lies outside every authorized, active site.
    #[error("Outside authorized perimeter")]
    PerimeterViolation,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}
