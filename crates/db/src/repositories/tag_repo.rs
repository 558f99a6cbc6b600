//! Repository for the `tags` and `question_tags` tables.
//!
//! Tags are created on first use and never deleted; a tag referenced by
//! zero questions is still listed (with a zero count).

use sqlx::PgPool;

use quanda_core::search::normalize_tag_name;
use quanda_core::types::DbId;

use crate::models::tag::{QuestionTagRow, Tag, TagWithCount};

/// Column list for `tags` queries.
const TAG_COLUMNS: &str = "id, name, created_at";

/// Provides tag resolution, counting, and question-tag associations.
pub struct TagRepo;

impl TagRepo {
    // -----------------------------------------------------------------------
    // Tag resolution
    // -----------------------------------------------------------------------

    /// Resolve each name to its tag row, creating missing tags.
    ///
    /// Names are normalized (trimmed, lowercased) before lookup, and
    /// duplicates within `names` collapse to a single entry. Creation is
    /// conflict-tolerant: when a concurrent caller inserts the same name
    /// first, the insert is a no-op and the re-fetch picks up the winner's
    /// row. Returned tags are in first-mention order.
    pub async fn resolve_or_create(
        pool: &PgPool,
        names: &[String],
    ) -> Result<Vec<Tag>, sqlx::Error> {
        let mut normalized: Vec<String> = Vec::new();
        for raw in names {
            let name = normalize_tag_name(raw);
            if !name.is_empty() && !normalized.contains(&name) {
                normalized.push(name);
            }
        }
        if normalized.is_empty() {
            return Ok(Vec::new());
        }

        for name in &normalized {
            sqlx::query("INSERT INTO tags (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
                .bind(name)
                .execute(pool)
                .await?;
        }

        let query = format!("SELECT {TAG_COLUMNS} FROM tags WHERE name = ANY($1)");
        let mut tags = sqlx::query_as::<_, Tag>(&query)
            .bind(&normalized)
            .fetch_all(pool)
            .await?;
        tags.sort_by_key(|tag| normalized.iter().position(|name| *name == tag.name));
        Ok(tags)
    }

    /// List every tag with the number of questions referencing it.
    ///
    /// Ordered by name; unreferenced tags report a count of zero.
    pub async fn counts_per_tag(pool: &PgPool) -> Result<Vec<TagWithCount>, sqlx::Error> {
        sqlx::query_as::<_, TagWithCount>(
            "SELECT t.id, t.name, COUNT(qt.question_id) AS question_count \
             FROM tags t \
             LEFT JOIN question_tags qt ON qt.tag_id = t.id \
             GROUP BY t.id, t.name \
             ORDER BY t.name",
        )
        .fetch_all(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Question-tag associations
    // -----------------------------------------------------------------------

    /// Link a question to a tag inside the caller's transaction.
    /// Idempotent: does nothing if the link already exists.
    pub async fn link_to_question(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        question_id: DbId,
        tag_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO question_tags (question_id, tag_id) \
             VALUES ($1, $2) \
             ON CONFLICT (question_id, tag_id) DO NOTHING",
        )
        .bind(question_id)
        .bind(tag_id)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Batch-load the tags of many questions in one query.
    ///
    /// Rows come back grouped by question, tags in name order.
    pub async fn tags_for_questions(
        pool: &PgPool,
        question_ids: &[DbId],
    ) -> Result<Vec<QuestionTagRow>, sqlx::Error> {
        if question_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, QuestionTagRow>(
            "SELECT qt.question_id, t.id AS tag_id, t.name \
             FROM question_tags qt \
             JOIN tags t ON t.id = qt.tag_id \
             WHERE qt.question_id = ANY($1) \
             ORDER BY qt.question_id, t.name",
        )
        .bind(question_ids)
        .fetch_all(pool)
        .await
    }
}
