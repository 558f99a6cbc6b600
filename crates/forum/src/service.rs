//! The forum operations: ask, read, list, answer, vote, comment.
//!
//! Every mutation validates content first, then vets the acting user, then
//! touches storage; reads aggregate in batches. Mutations emit one tracing
//! event each so the caller's log shows who did what to which entity.

use quanda_core::content::{
    validate_answer_body, validate_comment_body, validate_question_body, validate_question_tags,
    validate_question_title,
};
use quanda_core::error::CoreError;
use quanda_core::order::QuestionOrder;
use quanda_core::search::SearchQuery;
use quanda_core::types::DbId;
use quanda_db::models::answer::{AnswerDetail, NewAnswer};
use quanda_db::models::comment::NewComment;
use quanda_db::models::question::{NewQuestion, QuestionDetail};
use quanda_db::models::tag::TagWithCount;
use quanda_db::models::user::User;
use quanda_db::repositories::{AnswerRepo, CommentRepo, QuestionRepo, TagRepo, UserRepo};
use quanda_db::DbPool;

use crate::aggregate::{aggregate_answer, aggregate_question, aggregate_questions};
use crate::error::{ForumError, ForumResult};

/// The forum service. Cheap to clone; all state lives in the pool.
#[derive(Clone)]
pub struct Forum {
    pool: DbPool,
}

impl Forum {
    /// Build the service over an existing connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    // -----------------------------------------------------------------------
    // Questions
    // -----------------------------------------------------------------------

    /// Post a new question. Tags are resolved or created on first use.
    pub async fn add_question(&self, input: NewQuestion) -> ForumResult<QuestionDetail> {
        validate_question_title(&input.title)?;
        validate_question_body(&input.body)?;
        validate_question_tags(&input.tags)?;
        self.ensure_user(input.asked_by).await?;

        let tags = TagRepo::resolve_or_create(&self.pool, &input.tags).await?;
        let tag_ids: Vec<DbId> = tags.iter().map(|tag| tag.id).collect();
        let question = QuestionRepo::create(&self.pool, &input, &tag_ids).await?;

        tracing::info!(
            question_id = question.id,
            user_id = input.asked_by,
            tag_count = tag_ids.len(),
            "Question posted",
        );

        Ok(aggregate_question(&self.pool, question).await?)
    }

    /// Fetch a single question for display, counting the view.
    ///
    /// Each call increments `views` by exactly one before aggregating.
    pub async fn question_by_id(&self, id: DbId) -> ForumResult<QuestionDetail> {
        let question = QuestionRepo::increment_views(&self.pool, id)
            .await?
            .ok_or(ForumError::Core(CoreError::NotFound {
                entity: "Question",
                id,
            }))?;

        Ok(aggregate_question(&self.pool, question).await?)
    }

    /// List questions in the requested order, optionally filtered by a
    /// search query.
    ///
    /// The filter runs over the already-ordered list, so relative order is
    /// preserved; an empty or whitespace-only query matches everything.
    /// Zero matches is an empty list, not an error.
    pub async fn list_questions(
        &self,
        order: QuestionOrder,
        search: Option<&str>,
    ) -> ForumResult<Vec<QuestionDetail>> {
        let rows = match order {
            QuestionOrder::Newest | QuestionOrder::Active => {
                QuestionRepo::list_newest(&self.pool).await?
            }
            QuestionOrder::Unanswered => QuestionRepo::list_unanswered(&self.pool).await?,
        };

        let mut questions = aggregate_questions(&self.pool, rows).await?;

        if order == QuestionOrder::Active {
            // Stable sort: same-activity questions keep newest-first order.
            questions.sort_by(|a, b| b.most_recent_activity.cmp(&a.most_recent_activity));
        }

        if let Some(raw) = search {
            let query = SearchQuery::parse(raw);
            if !query.is_empty() {
                questions.retain(|question| {
                    let tag_names: Vec<&str> =
                        question.tags.iter().map(|tag| tag.name.as_str()).collect();
                    query.matches(&tag_names, &question.title, &question.body)
                });
            }
        }

        Ok(questions)
    }

    // -----------------------------------------------------------------------
    // Answers
    // -----------------------------------------------------------------------

    /// Post an answer to a question.
    pub async fn add_answer(&self, input: NewAnswer) -> ForumResult<AnswerDetail> {
        validate_answer_body(&input.body)?;
        self.ensure_user(input.answered_by).await?;

        if QuestionRepo::find_by_id(&self.pool, input.question_id)
            .await?
            .is_none()
        {
            return Err(ForumError::Core(CoreError::NotFound {
                entity: "Question",
                id: input.question_id,
            }));
        }

        let answer = AnswerRepo::create(&self.pool, &input).await?;

        tracing::info!(
            answer_id = answer.id,
            question_id = answer.question_id,
            user_id = input.answered_by,
            "Answer posted",
        );

        Ok(aggregate_answer(&self.pool, answer).await?)
    }

    /// Flip one voter's vote on an answer.
    ///
    /// A voter with no active vote casts one; a voter with an active vote
    /// withdraws it. Either way `votes == |voted_by|` holds afterwards.
    pub async fn toggle_vote(&self, answer_id: DbId, voter_id: DbId) -> ForumResult<AnswerDetail> {
        self.ensure_user(voter_id).await?;

        if AnswerRepo::find_by_id(&self.pool, answer_id).await?.is_none() {
            return Err(ForumError::Core(CoreError::NotFound {
                entity: "Answer",
                id: answer_id,
            }));
        }

        let transition = AnswerRepo::toggle_vote(&self.pool, answer_id, voter_id).await?;

        tracing::info!(
            answer_id,
            user_id = voter_id,
            transition = ?transition,
            "Vote toggled",
        );

        // Re-read: the toggle moved the counter after the existence check.
        let answer = AnswerRepo::find_by_id(&self.pool, answer_id)
            .await?
            .ok_or(ForumError::Core(CoreError::NotFound {
                entity: "Answer",
                id: answer_id,
            }))?;

        Ok(aggregate_answer(&self.pool, answer).await?)
    }

    // -----------------------------------------------------------------------
    // Comments
    // -----------------------------------------------------------------------

    /// Append a comment to an answer.
    pub async fn add_comment(&self, input: NewComment) -> ForumResult<AnswerDetail> {
        validate_comment_body(&input.body)?;
        self.ensure_user(input.commented_by).await?;

        let answer = AnswerRepo::find_by_id(&self.pool, input.answer_id)
            .await?
            .ok_or(ForumError::Core(CoreError::NotFound {
                entity: "Answer",
                id: input.answer_id,
            }))?;

        let comment = CommentRepo::create(&self.pool, &input).await?;

        tracing::info!(
            comment_id = comment.id,
            answer_id = answer.id,
            user_id = input.commented_by,
            "Comment added",
        );

        Ok(aggregate_answer(&self.pool, answer).await?)
    }

    // -----------------------------------------------------------------------
    // Tags
    // -----------------------------------------------------------------------

    /// Every tag with the number of questions referencing it, name order.
    /// Tags referenced by zero questions are included.
    pub async fn tags_with_counts(&self) -> ForumResult<Vec<TagWithCount>> {
        Ok(TagRepo::counts_per_tag(&self.pool).await?)
    }

    // -----------------------------------------------------------------------
    // Users
    // -----------------------------------------------------------------------

    /// Resolve an email to the stable user identity every other operation
    /// keys on. The edge service calls this once per authenticated caller,
    /// then passes ids.
    pub async fn user_by_email(&self, email: &str) -> ForumResult<Option<User>> {
        Ok(UserRepo::find_by_email(&self.pool, email).await?)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Fail with `UnknownUser` unless the id resolves to a known user.
    async fn ensure_user(&self, id: DbId) -> ForumResult<()> {
        if UserRepo::exists(&self.pool, id).await? {
            Ok(())
        } else {
            Err(ForumError::Core(CoreError::UnknownUser { id }))
        }
    }
}
