//! Integration tests for question CRUD and the view counter.
//!
//! Exercises the question repository against a real database:
//! - Creation with tag links in one transaction
//! - Atomic view increments
//! - Newest / unanswered listings

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use quanda_core::types::{DbId, Timestamp};
use quanda_db::models::answer::NewAnswer;
use quanda_db::models::question::NewQuestion;
use quanda_db::models::user::CreateUser;
use quanda_db::repositories::{AnswerRepo, QuestionRepo, TagRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn ts(raw: &str) -> Timestamp {
    DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
}

fn new_user(name: &str) -> CreateUser {
    CreateUser {
        username: name.to_string(),
        email: format!("{name}@example.com"),
    }
}

fn new_question(asked_by: DbId, title: &str, asked_at: &str) -> NewQuestion {
    NewQuestion {
        title: title.to_string(),
        body: "body".to_string(),
        tags: vec!["misc".to_string()],
        asked_by,
        asked_at: ts(asked_at),
    }
}

fn new_answer(question_id: DbId, answered_by: DbId, answered_at: &str) -> NewAnswer {
    NewAnswer {
        question_id,
        body: "an answer".to_string(),
        answered_by,
        answered_at: ts(answered_at),
    }
}

async fn resolve_tag(pool: &PgPool, name: &str) -> DbId {
    TagRepo::resolve_or_create(pool, &[name.to_string()])
        .await
        .unwrap()[0]
        .id
}

// ---------------------------------------------------------------------------
// Test: Create persists the row and its tag links
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_create_question_with_tags(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("alice")).await.unwrap();
    let tag_id = resolve_tag(&pool, "react").await;

    let question = QuestionRepo::create(
        &pool,
        &new_question(user.id, "How do hooks work?", "2023-01-01T00:00:00Z"),
        &[tag_id],
    )
    .await
    .unwrap();

    assert_eq!(question.title, "How do hooks work?");
    assert_eq!(question.asked_by, user.id);
    assert_eq!(question.asked_by_username, "alice");
    assert_eq!(question.views, 0);

    let rows = TagRepo::tags_for_questions(&pool, &[question.id])
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "react");
}

// ---------------------------------------------------------------------------
// Test: Duplicate tag ids collapse to one link
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_create_question_duplicate_tag_ids_link_once(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("bob")).await.unwrap();
    let tag_id = resolve_tag(&pool, "react").await;

    let question = QuestionRepo::create(
        &pool,
        &new_question(user.id, "Dup tags", "2023-01-01T00:00:00Z"),
        &[tag_id, tag_id],
    )
    .await
    .unwrap();

    let rows = TagRepo::tags_for_questions(&pool, &[question.id])
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
}

// ---------------------------------------------------------------------------
// Test: Creating with an unknown asker violates the FK
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_create_question_bad_asker_rejected(pool: PgPool) {
    let result = QuestionRepo::create(
        &pool,
        &new_question(999_999, "Ghost question", "2023-01-01T00:00:00Z"),
        &[],
    )
    .await;
    assert!(
        result.is_err(),
        "FK violation should fail for non-existent asked_by"
    );
}

// ---------------------------------------------------------------------------
// Test: Find by id misses cleanly
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_find_by_id_missing_returns_none(pool: PgPool) {
    let found = QuestionRepo::find_by_id(&pool, 999_999).await.unwrap();
    assert!(found.is_none());
}

// ---------------------------------------------------------------------------
// Test: Sequential view increments accumulate exactly
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_increment_views_adds_exactly_one(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("carol")).await.unwrap();
    let question = QuestionRepo::create(
        &pool,
        &new_question(user.id, "Views", "2023-01-01T00:00:00Z"),
        &[],
    )
    .await
    .unwrap();

    for expected in 1..=3 {
        let updated = QuestionRepo::increment_views(&pool, question.id)
            .await
            .unwrap()
            .expect("question exists");
        assert_eq!(updated.views, expected);
    }
}

// ---------------------------------------------------------------------------
// Test: Incrementing a missing question returns None
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_increment_views_missing_returns_none(pool: PgPool) {
    let updated = QuestionRepo::increment_views(&pool, 999_999).await.unwrap();
    assert!(updated.is_none());
}

// ---------------------------------------------------------------------------
// Test: Newest listing orders by asked_at descending
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_list_newest_orders_desc(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("dan")).await.unwrap();

    // Insert out of order.
    QuestionRepo::create(
        &pool,
        &new_question(user.id, "Middle", "2023-02-01T00:00:00Z"),
        &[],
    )
    .await
    .unwrap();
    QuestionRepo::create(
        &pool,
        &new_question(user.id, "Oldest", "2023-01-01T00:00:00Z"),
        &[],
    )
    .await
    .unwrap();
    QuestionRepo::create(
        &pool,
        &new_question(user.id, "Newest", "2023-03-01T00:00:00Z"),
        &[],
    )
    .await
    .unwrap();

    let listed = QuestionRepo::list_newest(&pool).await.unwrap();
    let titles: Vec<&str> = listed.iter().map(|q| q.title.as_str()).collect();
    assert_eq!(titles, ["Newest", "Middle", "Oldest"]);
}

// ---------------------------------------------------------------------------
// Test: Unanswered listing excludes answered questions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_list_unanswered_excludes_answered(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("erin")).await.unwrap();

    let answered = QuestionRepo::create(
        &pool,
        &new_question(user.id, "Answered", "2023-01-01T00:00:00Z"),
        &[],
    )
    .await
    .unwrap();
    QuestionRepo::create(
        &pool,
        &new_question(user.id, "Open", "2023-01-02T00:00:00Z"),
        &[],
    )
    .await
    .unwrap();

    AnswerRepo::create(&pool, &new_answer(answered.id, user.id, "2023-01-03T00:00:00Z"))
        .await
        .unwrap();

    let listed = QuestionRepo::list_unanswered(&pool).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "Open");
}
