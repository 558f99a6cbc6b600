//! Batch aggregation of rows into display-ready shapes.
//!
//! Listing N questions costs four array-bound queries (tags, answers,
//! votes, comments) regardless of N; rows are grouped in memory and the
//! derived activity timestamp is computed from the loaded answer dates.

use std::collections::HashMap;

use quanda_core::order::most_recent_activity;
use quanda_core::types::DbId;
use quanda_db::models::answer::{Answer, AnswerDetail};
use quanda_db::models::comment::{Comment, CommentDetail};
use quanda_db::models::question::{Question, QuestionDetail};
use quanda_db::models::tag::TagInfo;
use quanda_db::models::user::UserRef;
use quanda_db::repositories::{AnswerRepo, CommentRepo, TagRepo};
use quanda_db::DbPool;

/// Resolve tags, answers, votes, and comments for a batch of question rows.
///
/// Output order matches input order; a question with no tags, answers, or
/// views still aggregates cleanly with empty collections.
pub(crate) async fn aggregate_questions(
    pool: &DbPool,
    rows: Vec<Question>,
) -> Result<Vec<QuestionDetail>, sqlx::Error> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let question_ids: Vec<DbId> = rows.iter().map(|q| q.id).collect();

    let mut tags_by_question: HashMap<DbId, Vec<TagInfo>> = HashMap::new();
    for row in TagRepo::tags_for_questions(pool, &question_ids).await? {
        tags_by_question
            .entry(row.question_id)
            .or_default()
            .push(TagInfo {
                id: row.tag_id,
                name: row.name,
            });
    }

    let answers = AnswerRepo::list_for_questions(pool, &question_ids).await?;
    let answer_ids: Vec<DbId> = answers.iter().map(|a| a.id).collect();

    let mut voters_by_answer: HashMap<DbId, Vec<DbId>> = HashMap::new();
    for vote in AnswerRepo::voters_for_answers(pool, &answer_ids).await? {
        voters_by_answer
            .entry(vote.answer_id)
            .or_default()
            .push(vote.user_id);
    }

    let mut comments_by_answer: HashMap<DbId, Vec<CommentDetail>> = HashMap::new();
    for comment in CommentRepo::list_for_answers(pool, &answer_ids).await? {
        comments_by_answer
            .entry(comment.answer_id)
            .or_default()
            .push(comment_detail(comment));
    }

    let mut answers_by_question: HashMap<DbId, Vec<AnswerDetail>> = HashMap::new();
    for answer in answers {
        let voted_by = voters_by_answer.remove(&answer.id).unwrap_or_default();
        let comments = comments_by_answer.remove(&answer.id).unwrap_or_default();
        answers_by_question
            .entry(answer.question_id)
            .or_default()
            .push(answer_detail(answer, voted_by, comments));
    }

    let details = rows
        .into_iter()
        .map(|question| {
            let tags = tags_by_question.remove(&question.id).unwrap_or_default();
            let answers = answers_by_question
                .remove(&question.id)
                .unwrap_or_default();
            let most_recent_activity = most_recent_activity(
                question.asked_at,
                answers.iter().map(|a| a.answered_at),
            );
            QuestionDetail {
                id: question.id,
                title: question.title,
                body: question.body,
                tags,
                answers,
                asked_by: UserRef {
                    id: question.asked_by,
                    username: question.asked_by_username,
                },
                asked_at: question.asked_at,
                views: question.views,
                most_recent_activity,
            }
        })
        .collect();

    Ok(details)
}

/// Aggregate a single question row.
pub(crate) async fn aggregate_question(
    pool: &DbPool,
    row: Question,
) -> Result<QuestionDetail, sqlx::Error> {
    let mut details = aggregate_questions(pool, vec![row]).await?;
    details.pop().ok_or(sqlx::Error::RowNotFound)
}

/// Resolve the voter set and comments for a single answer row.
pub(crate) async fn aggregate_answer(
    pool: &DbPool,
    answer: Answer,
) -> Result<AnswerDetail, sqlx::Error> {
    let ids = [answer.id];
    let voted_by = AnswerRepo::voters_for_answers(pool, &ids)
        .await?
        .into_iter()
        .map(|vote| vote.user_id)
        .collect();
    let comments = CommentRepo::list_for_answers(pool, &ids)
        .await?
        .into_iter()
        .map(comment_detail)
        .collect();
    Ok(answer_detail(answer, voted_by, comments))
}

// ---------------------------------------------------------------------------
// Row-to-detail conversions
// ---------------------------------------------------------------------------

fn answer_detail(answer: Answer, voted_by: Vec<DbId>, comments: Vec<CommentDetail>) -> AnswerDetail {
    AnswerDetail {
        id: answer.id,
        question_id: answer.question_id,
        body: answer.body,
        answered_by: UserRef {
            id: answer.answered_by,
            username: answer.answered_by_username,
        },
        answered_at: answer.answered_at,
        votes: answer.votes,
        voted_by,
        comments,
    }
}

fn comment_detail(comment: Comment) -> CommentDetail {
    CommentDetail {
        id: comment.id,
        body: comment.body,
        commented_by: UserRef {
            id: comment.commented_by,
            username: comment.commented_by_username,
        },
        commented_at: comment.commented_at,
    }
}
