//! Repository for the `answers` and `answer_votes` tables.
//!
//! The `votes` column on `answers` is denormalized for cheap display; the
//! toggle transaction below is the only writer, keeping it equal to the
//! number of `answer_votes` rows at all times.

use sqlx::PgPool;

use quanda_core::types::DbId;

use crate::models::answer::{Answer, AnswerVote, NewAnswer, VoteTransition};

/// Column list for `answers` queries (aliased for the `users` join).
const ANSWER_COLUMNS: &str = "\
    a.id, a.question_id, a.body, a.answered_by, \
    u.username AS answered_by_username, a.answered_at, a.votes";

/// Provides CRUD operations for answers and the vote ledger.
pub struct AnswerRepo;

impl AnswerRepo {
    // -----------------------------------------------------------------------
    // Answers
    // -----------------------------------------------------------------------

    /// Insert a new answer, returning the row with the author's name.
    pub async fn create(pool: &PgPool, input: &NewAnswer) -> Result<Answer, sqlx::Error> {
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO answers (question_id, body, answered_by, answered_at) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id",
        )
        .bind(input.question_id)
        .bind(&input.body)
        .bind(input.answered_by)
        .bind(input.answered_at)
        .fetch_one(pool)
        .await?;

        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Find an answer by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Answer>, sqlx::Error> {
        let query = format!(
            "SELECT {ANSWER_COLUMNS} \
             FROM answers a \
             JOIN users u ON u.id = a.answered_by \
             WHERE a.id = $1"
        );
        sqlx::query_as::<_, Answer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Batch-load the answers of many questions in one query.
    ///
    /// Rows come back grouped by question, newest answer first (`id` breaks
    /// same-instant ties).
    pub async fn list_for_questions(
        pool: &PgPool,
        question_ids: &[DbId],
    ) -> Result<Vec<Answer>, sqlx::Error> {
        if question_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {ANSWER_COLUMNS} \
             FROM answers a \
             JOIN users u ON u.id = a.answered_by \
             WHERE a.question_id = ANY($1) \
             ORDER BY a.question_id, a.answered_at DESC, a.id DESC"
        );
        sqlx::query_as::<_, Answer>(&query)
            .bind(question_ids)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Vote ledger
    // -----------------------------------------------------------------------

    /// Flip one voter's state on an answer.
    ///
    /// No active vote: insert the ledger row and increment the counter.
    /// Active vote: delete the row and decrement the counter. Both the
    /// ledger row and the counter move in one transaction, so
    /// `votes == |voted_by|` holds at every commit point. The counter
    /// decrement is clamped at zero; concurrent toggles by the same voter
    /// serialize on the primary key, last write wins.
    pub async fn toggle_vote(
        pool: &PgPool,
        answer_id: DbId,
        voter_id: DbId,
    ) -> Result<VoteTransition, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert = sqlx::query(
            "INSERT INTO answer_votes (answer_id, user_id) \
             VALUES ($1, $2) \
             ON CONFLICT (answer_id, user_id) DO NOTHING",
        )
        .bind(answer_id)
        .bind(voter_id)
        .execute(&mut *tx)
        .await?;
        let was_inserted = insert.rows_affected() > 0;

        let transition = if was_inserted {
            sqlx::query("UPDATE answers SET votes = votes + 1 WHERE id = $1")
                .bind(answer_id)
                .execute(&mut *tx)
                .await?;
            VoteTransition::Cast
        } else {
            let delete =
                sqlx::query("DELETE FROM answer_votes WHERE answer_id = $1 AND user_id = $2")
                    .bind(answer_id)
                    .bind(voter_id)
                    .execute(&mut *tx)
                    .await?;
            let was_deleted = delete.rows_affected() > 0;

            if was_deleted {
                sqlx::query("UPDATE answers SET votes = GREATEST(votes - 1, 0) WHERE id = $1")
                    .bind(answer_id)
                    .execute(&mut *tx)
                    .await?;
            }
            VoteTransition::Withdrawn
        };

        tx.commit().await?;
        Ok(transition)
    }

    /// Batch-load the voter sets of many answers in one query.
    ///
    /// Rows come back grouped by answer, oldest vote first.
    pub async fn voters_for_answers(
        pool: &PgPool,
        answer_ids: &[DbId],
    ) -> Result<Vec<AnswerVote>, sqlx::Error> {
        if answer_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, AnswerVote>(
            "SELECT answer_id, user_id, voted_at \
             FROM answer_votes \
             WHERE answer_id = ANY($1) \
             ORDER BY answer_id, voted_at, user_id",
        )
        .bind(answer_ids)
        .fetch_all(pool)
        .await
    }
}
