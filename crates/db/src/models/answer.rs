//! Answer and answer-vote models, DTOs, and the aggregated display shape.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use quanda_core::types::{DbId, Timestamp};

use crate::models::comment::CommentDetail;
use crate::models::user::UserRef;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `answers` table, joined with the author's display name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Answer {
    pub id: DbId,
    pub question_id: DbId,
    pub body: String,
    pub answered_by: DbId,
    pub answered_by_username: String,
    pub answered_at: Timestamp,
    /// Denormalized count; kept equal to the number of `answer_votes` rows
    /// by the toggle transaction.
    pub votes: i32,
}

/// A row from the `answer_votes` junction table: one voter's active vote
/// on one answer.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AnswerVote {
    pub answer_id: DbId,
    pub user_id: DbId,
    pub voted_at: Timestamp,
}

/// Which way a toggle moved an (answer, voter) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteTransition {
    /// The voter had no active vote; one was cast.
    Cast,
    /// The voter had an active vote; it was withdrawn.
    Withdrawn,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for posting a new answer.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAnswer {
    pub question_id: DbId,
    pub body: String,
    pub answered_by: DbId,
    pub answered_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Aggregated display shapes
// ---------------------------------------------------------------------------

/// An answer with its voter set and comments resolved.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerDetail {
    pub id: DbId,
    pub question_id: DbId,
    pub body: String,
    pub answered_by: UserRef,
    pub answered_at: Timestamp,
    pub votes: i32,
    /// Ids of users with an active vote, oldest vote first.
    pub voted_by: Vec<DbId>,
    /// Comments in insertion order.
    pub comments: Vec<CommentDetail>,
}
