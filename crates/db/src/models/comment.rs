//! Comment model, DTO, and display shape.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use quanda_core::types::{DbId, Timestamp};

use crate::models::user::UserRef;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `comments` table, joined with the commenter's display name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub answer_id: DbId,
    pub body: String,
    pub commented_by: DbId,
    pub commented_by_username: String,
    pub commented_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for adding a comment to an answer.
#[derive(Debug, Clone, Deserialize)]
pub struct NewComment {
    pub answer_id: DbId,
    pub body: String,
    pub commented_by: DbId,
    pub commented_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Aggregated display shapes
// ---------------------------------------------------------------------------

/// A comment with its author resolved, as embedded in [`AnswerDetail`].
///
/// [`AnswerDetail`]: crate::models::answer::AnswerDetail
#[derive(Debug, Clone, Serialize)]
pub struct CommentDetail {
    pub id: DbId,
    pub body: String,
    pub commented_by: UserRef,
    pub commented_at: Timestamp,
}
