use crate::types::DbId;

/// Domain-level failures surfaced by every core operation.
///
/// The calling edge service owns the mapping to transport responses;
/// nothing here is retried internally.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced question, answer, or tag id does not exist.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A required field is missing or malformed (empty title, empty tag
    /// list, oversized comment, unknown order key, ...).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// An asker/answerer/voter/commenter identity does not resolve to a
    /// known user.
    #[error("Unknown user: id {id}")]
    UnknownUser { id: DbId },
}
