use quanda_core::error::CoreError;

/// Service-level error type for forum operations.
///
/// Wraps [`CoreError`] for domain errors and adds a database variant. The
/// calling edge service owns any transport mapping (status codes, JSON
/// shaping); this crate only distinguishes domain failures from
/// infrastructure failures.
#[derive(Debug, thiserror::Error)]
pub enum ForumError {
    /// A domain-level error from `quanda_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience type alias for operation return values.
pub type ForumResult<T> = Result<T, ForumError>;
