//! Tag and question-tag models.

use serde::Serialize;
use sqlx::FromRow;

use quanda_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `tags` table. Names are stored normalized (trimmed,
/// lowercased), so equality on `name` is already case-insensitive.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tag {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

/// Lightweight tag info embedded in aggregated questions.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct TagInfo {
    pub id: DbId,
    pub name: String,
}

/// A tag with the number of questions referencing it. Tags referenced by
/// no question report a count of zero.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TagWithCount {
    pub id: DbId,
    pub name: String,
    pub question_count: i64,
}

/// Junction row used when batch-loading the tags of many questions.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuestionTagRow {
    pub question_id: DbId,
    pub tag_id: DbId,
    pub name: String,
}
