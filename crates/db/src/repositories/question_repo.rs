//! Repository for the `questions` table.
//!
//! Every read joins `users` so the asker's display name travels with the
//! row; listing queries order newest-first with `id` as the tiebreaker so
//! same-instant questions have a stable order.

use sqlx::PgPool;

use quanda_core::types::DbId;

use crate::models::question::{NewQuestion, Question};
use crate::repositories::tag_repo::TagRepo;

/// Column list for `questions` queries (aliased for the `users` join).
const QUESTION_COLUMNS: &str = "\
    q.id, q.title, q.body, q.asked_by, u.username AS asked_by_username, \
    q.asked_at, q.views";

/// Provides CRUD operations for questions and their tag links.
pub struct QuestionRepo;

impl QuestionRepo {
    /// Insert a question and its tag links in one transaction.
    ///
    /// `tag_ids` must already be resolved (see [`TagRepo::resolve_or_create`]);
    /// duplicate ids collapse to a single link.
    pub async fn create(
        pool: &PgPool,
        input: &NewQuestion,
        tag_ids: &[DbId],
    ) -> Result<Question, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let id: DbId = sqlx::query_scalar(
            "INSERT INTO questions (title, body, asked_by, asked_at) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id",
        )
        .bind(&input.title)
        .bind(&input.body)
        .bind(input.asked_by)
        .bind(input.asked_at)
        .fetch_one(&mut *tx)
        .await?;

        for &tag_id in tag_ids {
            TagRepo::link_to_question(&mut tx, id, tag_id).await?;
        }

        tx.commit().await?;

        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Find a question by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Question>, sqlx::Error> {
        let query = format!(
            "SELECT {QUESTION_COLUMNS} \
             FROM questions q \
             JOIN users u ON u.id = q.asked_by \
             WHERE q.id = $1"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Atomically add one view and return the updated row.
    ///
    /// A single `UPDATE ... RETURNING` statement, so concurrent reads never
    /// lose an increment. Returns `None` if no row with the given `id`
    /// exists.
    pub async fn increment_views(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Question>, sqlx::Error> {
        let query = format!(
            "UPDATE questions q SET views = views + 1 \
             FROM users u \
             WHERE q.id = $1 AND u.id = q.asked_by \
             RETURNING {QUESTION_COLUMNS}"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all questions, most recently asked first.
    pub async fn list_newest(pool: &PgPool) -> Result<Vec<Question>, sqlx::Error> {
        let query = format!(
            "SELECT {QUESTION_COLUMNS} \
             FROM questions q \
             JOIN users u ON u.id = q.asked_by \
             ORDER BY q.asked_at DESC, q.id DESC"
        );
        sqlx::query_as::<_, Question>(&query).fetch_all(pool).await
    }

    /// List questions with no answers, most recently asked first.
    pub async fn list_unanswered(pool: &PgPool) -> Result<Vec<Question>, sqlx::Error> {
        let query = format!(
            "SELECT {QUESTION_COLUMNS} \
             FROM questions q \
             JOIN users u ON u.id = q.asked_by \
             WHERE NOT EXISTS (SELECT 1 FROM answers a WHERE a.question_id = q.id) \
             ORDER BY q.asked_at DESC, q.id DESC"
        );
        sqlx::query_as::<_, Question>(&query).fetch_all(pool).await
    }
}
