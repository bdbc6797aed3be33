/// Failure reading or writing persistent state.
///
/// Callers do not distinguish transient from permanent faults.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A write broke a table constraint.
    #[error("Constraint violated: {0}")]
    Constraint(String),
}
