use chrono::{Duration, Utc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quanda_core::order::QuestionOrder;
use quanda_core::types::Timestamp;
use quanda_db::models::answer::NewAnswer;
use quanda_db::models::comment::NewComment;
use quanda_db::models::question::NewQuestion;
use quanda_db::models::user::{CreateUser, User};
use quanda_db::repositories::UserRepo;
use quanda_db::{DbConfig, DbPool};
use quanda_forum::{Forum, ForumResult};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quanda_seed=info,quanda_forum=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Database ---
    let config = DbConfig::from_env();
    tracing::info!(
        max_connections = config.max_connections,
        "Loaded database configuration"
    );

    let pool = quanda_db::connect(&config)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    quanda_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    quanda_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Demo data ---
    let forum = Forum::new(pool.clone());
    seed(&pool, &forum).await.expect("Seeding failed");
}

/// Populate an empty database with demo users, questions, answers, votes,
/// and comments, all through the public forum operations so the seeded
/// rows obey the same rules as live traffic.
///
/// A non-empty database is left untouched, so the binary is safe to run
/// on every deploy.
async fn seed(pool: &DbPool, forum: &Forum) -> ForumResult<()> {
    let existing = forum.list_questions(QuestionOrder::Newest, None).await?;
    if !existing.is_empty() {
        tracing::info!(
            questions = existing.len(),
            "Database already seeded, nothing to do"
        );
        return Ok(());
    }

    let joji = ensure_user(pool, forum, "joji_john", "joji@example.com").await?;
    let peter = ensure_user(pool, forum, "salty_peter", "peter@example.com").await?;
    let monkey = ensure_user(pool, forum, "monkey_abc", "monkey@example.com").await?;
    let elephant = ensure_user(pool, forum, "elephant_cde", "elephant@example.com").await?;

    let now = Utc::now();

    // A well-trafficked question: two answers, votes, a comment.
    let navigation = forum
        .add_question(NewQuestion {
            title: "Programmatically navigate using React router".to_string(),
            body: "I want to redirect after a form submit without rendering a \
                   Link component. What is the supported way to navigate from code?"
                .to_string(),
            tags: vec!["react".to_string(), "javascript".to_string()],
            asked_by: joji.id,
            asked_at: days_ago(now, 40),
        })
        .await?;
    let top_answer = forum
        .add_answer(NewAnswer {
            question_id: navigation.id,
            body: "React Router v6 exposes a useNavigate hook; call navigate(\"/path\") \
                   from your submit handler."
                .to_string(),
            answered_by: peter.id,
            answered_at: days_ago(now, 39),
        })
        .await?;
    forum
        .add_answer(NewAnswer {
            question_id: navigation.id,
            body: "On older versions you reach for the history object instead; \
                   withRouter injects it into class components."
                .to_string(),
            answered_by: monkey.id,
            answered_at: days_ago(now, 38),
        })
        .await?;
    forum.toggle_vote(top_answer.id, monkey.id).await?;
    forum.toggle_vote(top_answer.id, elephant.id).await?;
    forum
        .add_comment(NewComment {
            answer_id: top_answer.id,
            body: "Confirmed working on v6.4.".to_string(),
            commented_by: elephant.id,
            commented_at: days_ago(now, 37),
        })
        .await?;

    // Answered later than the next question was asked, so the active
    // order visibly diverges from newest.
    let preferences = forum
        .add_question(NewQuestion {
            title: "android studio save string shared preference, start activity and load the saved string"
                .to_string(),
            body: "I would like to save a string in one activity, start another, \
                   and read the value back. Which shared preferences calls do I need?"
                .to_string(),
            tags: vec!["android-studio".to_string(), "shared-preferences".to_string()],
            asked_by: peter.id,
            asked_at: days_ago(now, 30),
        })
        .await?;
    let preferences_answer = forum
        .add_answer(NewAnswer {
            question_id: preferences.id,
            body: "Use getSharedPreferences with MODE_PRIVATE, write through its \
                   editor, then read with getString in the second activity."
                .to_string(),
            answered_by: joji.id,
            answered_at: days_ago(now, 6),
        })
        .await?;
    forum.toggle_vote(preferences_answer.id, elephant.id).await?;

    let storage = forum
        .add_question(NewQuestion {
            title: "Object storage for a web application".to_string(),
            body: "I am building a web application that needs to store user uploads \
                   durably. Is an object store the right fit, and how do I talk to \
                   one from async javascript?"
                .to_string(),
            tags: vec!["javascript".to_string(), "storage".to_string()],
            asked_by: monkey.id,
            asked_at: days_ago(now, 14),
        })
        .await?;
    let storage_answer = forum
        .add_answer(NewAnswer {
            question_id: storage.id,
            body: "Yes; presign upload URLs on the server and PUT directly from the \
                   browser, keeping only the object keys in your database."
                .to_string(),
            answered_by: elephant.id,
            answered_at: days_ago(now, 10),
        })
        .await?;
    forum
        .add_comment(NewComment {
            answer_id: storage_answer.id,
            body: "Presigned URLs also sidestep the request size limits.".to_string(),
            commented_by: joji.id,
            commented_at: days_ago(now, 9),
        })
        .await?;

    // Left unanswered so the unanswered listing has something to show.
    forum
        .add_question(NewQuestion {
            title: "Quick question about storage on android".to_string(),
            body: "Is there a size limit for shared preferences, and at what point \
                   should I move to a database instead?"
                .to_string(),
            tags: vec!["android-studio".to_string(), "storage".to_string()],
            asked_by: elephant.id,
            asked_at: days_ago(now, 7),
        })
        .await?;

    let questions = forum.list_questions(QuestionOrder::Newest, None).await?;
    let tags = forum.tags_with_counts().await?;
    tracing::info!(
        questions = questions.len(),
        tags = tags.len(),
        "Demo data seeded"
    );
    Ok(())
}

/// Find a user by email or create one. The seed shares its database with
/// the live forum, so existing accounts are reused rather than duplicated.
async fn ensure_user(
    pool: &DbPool,
    forum: &Forum,
    username: &str,
    email: &str,
) -> ForumResult<User> {
    if let Some(user) = forum.user_by_email(email).await? {
        return Ok(user);
    }

    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: email.to_string(),
        },
    )
    .await?;
    tracing::info!(user_id = user.id, username, "Created demo user");
    Ok(user)
}

fn days_ago(now: Timestamp, days: i64) -> Timestamp {
    now - Duration::days(days)
}
