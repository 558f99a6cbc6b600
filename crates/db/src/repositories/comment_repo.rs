//! Repository for the `comments` table.
//!
//! Comments are append-only: no edit, no delete, insertion order is the
//! display order.

use sqlx::PgPool;

use quanda_core::types::DbId;

use crate::models::comment::{Comment, NewComment};

/// Column list for `comments` queries (aliased for the `users` join).
const COMMENT_COLUMNS: &str = "\
    c.id, c.answer_id, c.body, c.commented_by, \
    u.username AS commented_by_username, c.commented_at";

/// Provides append and batch-read operations for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Append a comment, returning the row with the commenter's name.
    pub async fn create(pool: &PgPool, input: &NewComment) -> Result<Comment, sqlx::Error> {
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO comments (answer_id, body, commented_by, commented_at) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id",
        )
        .bind(input.answer_id)
        .bind(&input.body)
        .bind(input.commented_by)
        .bind(input.commented_at)
        .fetch_one(pool)
        .await?;

        let query = format!(
            "SELECT {COMMENT_COLUMNS} \
             FROM comments c \
             JOIN users u ON u.id = c.commented_by \
             WHERE c.id = $1"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Batch-load the comments of many answers in one query.
    ///
    /// Rows come back grouped by answer, in insertion order (`id` breaks
    /// same-instant ties).
    pub async fn list_for_answers(
        pool: &PgPool,
        answer_ids: &[DbId],
    ) -> Result<Vec<Comment>, sqlx::Error> {
        if answer_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COMMENT_COLUMNS} \
             FROM comments c \
             JOIN users u ON u.id = c.commented_by \
             WHERE c.answer_id = ANY($1) \
             ORDER BY c.answer_id, c.commented_at, c.id"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(answer_ids)
            .fetch_all(pool)
            .await
    }
}
