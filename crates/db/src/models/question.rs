//! Question models, DTOs, and the aggregated display shape.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use quanda_core::types::{DbId, Timestamp};

use crate::models::answer::AnswerDetail;
use crate::models::tag::TagInfo;
use crate::models::user::UserRef;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `questions` table, joined with the asker's display name.
///
/// Every question read goes through the same join, so the username is part
/// of the row shape rather than a separate lookup.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Question {
    pub id: DbId,
    pub title: String,
    pub body: String,
    pub asked_by: DbId,
    pub asked_by_username: String,
    pub asked_at: Timestamp,
    pub views: i32,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for posting a new question.
#[derive(Debug, Clone, Deserialize)]
pub struct NewQuestion {
    pub title: String,
    pub body: String,
    /// Tag names as typed; normalized (trimmed, lowercased) on resolution
    /// and created on first use.
    pub tags: Vec<String>,
    pub asked_by: DbId,
    pub asked_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Aggregated display shapes
// ---------------------------------------------------------------------------

/// A question with tags, answers, votes, and comments fully resolved.
///
/// Tags are in name order, answers newest first. `most_recent_activity`
/// is derived at aggregation time: the question's own post date when it
/// has no answers, else the latest answer date.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionDetail {
    pub id: DbId,
    pub title: String,
    pub body: String,
    pub tags: Vec<TagInfo>,
    pub answers: Vec<AnswerDetail>,
    pub asked_by: UserRef,
    pub asked_at: Timestamp,
    pub views: i32,
    pub most_recent_activity: Timestamp,
}
